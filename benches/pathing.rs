use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use wall_mazes::cells::CellCoordinate;
use wall_mazes::grids::new_seeded_maze;
use wall_mazes::pathing;
use wall_mazes::units::{Height, Width};

fn bench_dfs_path(c: &mut Criterion) {
    c.bench_function("dfs_path", |b| {
        let g = new_seeded_maze(Width(350), Height(350), 350).unwrap();
        let start = CellCoordinate::new(250, 250);
        let end = CellCoordinate::new(0, 0);
        b.iter(|| pathing::dfs_path(&g, start, end))
    });
}

fn bench_solve_dfs(c: &mut Criterion) {
    c.bench_function("solve_dfs", |b| {
        let mut g = new_seeded_maze(Width(350), Height(350), 351).unwrap();
        b.iter(|| pathing::solve_dfs(&mut g))
    });
}

criterion_group!(benches,
    bench_dfs_path,
    bench_solve_dfs
);
criterion_main!(benches);
