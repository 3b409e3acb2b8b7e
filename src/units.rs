/// Number of logical cells along a maze row.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);

/// Number of logical cells along a maze column.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Length of a row in the doubled-resolution buffer, `2 * width + 1`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RawWidth(pub usize);

/// Length of a column in the doubled-resolution buffer, `2 * height + 1`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RawHeight(pub usize);
