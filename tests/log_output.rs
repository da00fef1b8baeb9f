use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::{current_commit, init_repository, open_repository, repository_dir, write_file};

#[rstest]
fn log_without_commits_prints_a_notice(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());

    repository.log().unwrap();

    assert!(output.contents().contains("No commits yet."));
}

#[rstest]
fn log_walks_the_first_parent_chain_newest_first(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "file.txt", "v1\n");
    repository.add("file.txt").unwrap();
    repository.commit("First commit").unwrap();
    let first = current_commit(dir);

    write_file(dir, "file.txt", "v2\n");
    repository.add("file.txt").unwrap();
    repository.commit("Second commit").unwrap();
    let second = current_commit(dir);

    repository.log().unwrap();

    let printed = output.contents();
    assert!(printed.contains("Commit:"));
    assert!(printed.contains(&second[..7]));
    assert!(printed.contains(&first[..7]));
    assert!(printed.contains("HEAD -> master"));
    assert!(printed.contains(&format!("Parents: {}", &first[..7])));
    assert!(printed.contains("Message: First commit"));
    assert!(printed.contains("Message: Second commit"));

    let second_pos = printed.find("Message: Second commit").unwrap();
    let first_pos = printed.find("Message: First commit").unwrap();
    assert!(second_pos < first_pos);
}

#[rstest]
fn log_decorates_other_branches(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "file.txt", "v1\n");
    repository.add("file.txt").unwrap();
    repository.commit("First commit").unwrap();
    repository.branch("extra").unwrap();

    repository.log().unwrap();

    let printed = output.contents();
    assert!(printed.contains("HEAD -> master"));
    assert!(printed.contains("extra"));
}

#[rstest]
fn log_visits_each_commit_once_even_in_a_forged_cycle(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, _output) = init_repository(dir);
    drop(repository);

    // two handwritten records whose parent lists form a loop
    let a = "a".repeat(40);
    let b = "b".repeat(40);
    std::fs::write(
        dir.join(".minigit/commits").join(&a),
        format!("message:A\ntimestamp:2024-05-01 10:00:00\nparents:{b}\nfiles:\n"),
    )
    .unwrap();
    std::fs::write(
        dir.join(".minigit/commits").join(&b),
        format!("message:B\ntimestamp:2024-05-01 10:00:01\nparents:{a}\nfiles:\n"),
    )
    .unwrap();
    std::fs::write(dir.join(".minigit/HEAD"), format!("{a}\n")).unwrap();

    let (repository, output) = open_repository(dir);
    repository.log().unwrap();

    let printed = output.contents();
    assert_eq!(printed.matches("Message: A").count(), 1);
    assert_eq!(printed.matches("Message: B").count(), 1);
}

#[rstest]
fn log_stops_at_a_corrupt_reference(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, _output) = init_repository(dir);
    write_file(dir, "file.txt", "v1\n");
    repository.add("file.txt").unwrap();
    repository.commit("First commit").unwrap();
    let first = current_commit(dir);

    write_file(dir, "file.txt", "v2\n");
    repository.add("file.txt").unwrap();
    repository.commit("Second commit").unwrap();
    drop(repository);

    // truncate the older record to simulate an interrupted write
    std::fs::write(
        dir.join(".minigit/commits").join(&first),
        "message:First commit\n",
    )
    .unwrap();

    let (repository, output) = open_repository(dir);
    repository.log().unwrap();

    let printed = output.contents();
    assert!(printed.contains("Message: Second commit"));
    assert!(!printed.contains("Message: First commit"));
}
