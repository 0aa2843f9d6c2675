use std::fs;
use std::path::Path;

/// Write `content` at `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// The registry used throughout: two MIMIC versions under a category README,
/// eICU, two tasks (one behind a gap directory), and one model.
pub fn build_registry(root: &Path) {
    write_file(root, "datasets/MIMIC/README.md", "This is a README for the category.");

    write_file(root, "datasets/MIMIC/III/dataset.yaml", "foo: bar\n");
    write_file(root, "datasets/MIMIC/III/README.md", "This is a README.");
    write_file(root, "datasets/MIMIC/III/refs.bib", "@article{foo, bar}");
    write_file(root, "datasets/MIMIC/III/predicates.yaml", "predicate: value\n");
    write_file(
        root,
        "datasets/MIMIC/III/requirements.txt",
        "numpy==1.21.0\npandas==1.3.0",
    );

    write_file(root, "datasets/MIMIC/IV/dataset.yaml", "foo: baz\n");
    write_file(root, "datasets/MIMIC/IV/README.md", "This is another README.");
    write_file(root, "datasets/MIMIC/IV/refs.bib", "@article{baz, qux}");
    write_file(root, "datasets/MIMIC/IV/predicates.yaml", "predicate: alt_value\n");
    write_file(
        root,
        "datasets/MIMIC/IV/requirements.txt",
        "numpy==1.21.0\npandas==1.3.0",
    );

    write_file(root, "datasets/eICU/dataset.yaml", "foo: quux\n");
    write_file(root, "datasets/eICU/predicates.yaml", "predicate: quuz\n");

    write_file(root, "tasks/mortality/README.md", "This is a README for the task.");
    write_file(
        root,
        "tasks/mortality/in_icu/first_24h/README.md",
        "This is a README for the mortality/in_icu/first_24h task.",
    );
    write_file(root, "tasks/mortality/in_icu/first_24h/task.yaml", "task: value\n");
    write_file(
        root,
        "tasks/readmission/30d/README.md",
        "This is a README for the readmission/30d task.",
    );
    write_file(root, "tasks/readmission/30d/task.yaml", "task: value\n");

    write_file(root, "models/cehrbert/README.md", "This is a README for the model.");
    write_file(root, "models/cehrbert/model.yaml", "model: value\n");
    write_file(root, "models/cehrbert/refs.bib", "@article{model, paper}");
    write_file(root, "models/cehrbert/requirements.txt", "numpy==1.21.0");
}
