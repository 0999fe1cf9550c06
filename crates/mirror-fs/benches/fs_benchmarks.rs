use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mirror_fs::{RelativePath, checksum};
use std::fs;
use tempfile::tempdir;

fn file_checksum_benchmark(c: &mut Criterion) {
    c.bench_function("checksum::compute_file_checksum (4 MiB)", |b| {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let content: Vec<u8> = (0..4 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
        fs::write(&path, content).unwrap();

        b.iter(|| {
            checksum::compute_file_checksum(black_box(&path)).unwrap();
        })
    });
}

fn relative_path_benchmark(c: &mut Criterion) {
    c.bench_function("path::RelativePath::new (mixed separators)", |b| {
        b.iter(|| RelativePath::new(black_box("a\\b/c\\d/./e//file.txt")))
    });
}

criterion_group!(benches, file_checksum_benchmark, relative_path_benchmark);
criterion_main!(benches);
