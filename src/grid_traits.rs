use crate::cells::GridValue;

pub trait GridDisplay {
    /// Render one position of the raw grid buffer as text.
    /// Every value should render to the same number of columns so the rows line up.
    fn render_value(&self, value: GridValue) -> &str;
}
