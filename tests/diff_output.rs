use assert_fs::TempDir;
use rstest::rstest;

mod common;
use common::{current_commit, delete_file, init_repository, repository_dir, write_file};

#[rstest]
fn workspace_vs_index_shows_unstaged_edits(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "file.txt", "Line 1\nLine 2\n");
    repository.add("file.txt").unwrap();
    write_file(dir, "file.txt", "Line 1\nChanged\n");

    repository.diff(false, &[]).unwrap();

    let printed = output.contents();
    assert!(printed.contains("Diff: Working Directory vs Staging Area"));
    assert!(printed.contains("Diff for: file.txt"));
    assert!(printed.contains("  Line 1"));
    assert!(printed.contains("- Line 2"));
    assert!(printed.contains("+ Changed"));
}

#[rstest]
fn workspace_vs_index_reports_staged_files_gone_from_disk(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "file.txt", "Line 1\n");
    repository.add("file.txt").unwrap();
    delete_file(dir, "file.txt");

    repository.diff(false, &[]).unwrap();

    let printed = output.contents();
    assert!(printed.contains("file.txt (deleted from WD)"));
    assert!(printed.contains("- Line 1"));
}

#[rstest]
fn workspace_vs_index_ignores_untracked_files(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "loose.txt", "nobody staged me\n");

    repository.diff(false, &[]).unwrap();

    assert!(output
        .contents()
        .contains("No differences in working directory compared to staged area."));
}

#[rstest]
fn staged_mode_compares_index_against_head(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "file.txt", "old line\n");
    repository.add("file.txt").unwrap();
    repository.commit("Base").unwrap();

    write_file(dir, "file.txt", "new line\n");
    repository.add("file.txt").unwrap();
    write_file(dir, "fresh.txt", "brand new\n");
    repository.add("fresh.txt").unwrap();

    repository.diff(true, &[]).unwrap();

    let printed = output.contents();
    assert!(printed.contains("Diff: Staging Area vs HEAD commit"));
    assert!(printed.contains("- old line"));
    assert!(printed.contains("+ new line"));
    assert!(printed.contains("fresh.txt (new file staged)"));
    assert!(printed.contains("+ brand new"));
}

#[rstest]
fn staged_mode_without_a_head_commit_prints_a_notice(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());

    repository.diff(true, &[]).unwrap();

    assert!(output
        .contents()
        .contains("No HEAD commit to compare against."));
}

#[rstest]
fn two_commits_diff_by_digest_prefix(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "file.txt", "v1\n");
    repository.add("file.txt").unwrap();
    repository.commit("First").unwrap();
    let first = current_commit(dir);

    write_file(dir, "file.txt", "v2\n");
    write_file(dir, "added.txt", "fresh\n");
    repository.add("file.txt").unwrap();
    repository.add("added.txt").unwrap();
    repository.commit("Second").unwrap();
    let second = current_commit(dir);

    repository
        .diff(false, &[first[..7].to_string(), second[..7].to_string()])
        .unwrap();

    let printed = output.contents();
    assert!(printed.contains(&format!(
        "Diff between {} and {}",
        &first[..7],
        &second[..7]
    )));
    assert!(printed.contains("- v1"));
    assert!(printed.contains("+ v2"));
    assert!(printed.contains("added.txt (new file)"));
}

#[rstest]
fn commit_diff_reports_deletions(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "gone.txt", "short lived\n");
    repository.add("gone.txt").unwrap();
    repository.commit("First").unwrap();
    let first = current_commit(dir);

    delete_file(dir, "gone.txt");
    write_file(dir, "kept.txt", "still here\n");
    repository.add("kept.txt").unwrap();
    repository.commit("Second").unwrap();
    let second = current_commit(dir);

    repository
        .diff(false, &[first.clone(), second.clone()])
        .unwrap();

    let printed = output.contents();
    assert!(printed.contains("gone.txt (deleted)"));
    assert!(printed.contains("- short lived"));
}

#[rstest]
fn workspace_vs_commit_covers_all_three_cases(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let (repository, output) = init_repository(dir);
    write_file(dir, "modified.txt", "from commit\n");
    write_file(dir, "deleted.txt", "will vanish\n");
    repository.add("modified.txt").unwrap();
    repository.add("deleted.txt").unwrap();
    repository.commit("Base").unwrap();
    let base = current_commit(dir);

    write_file(dir, "modified.txt", "from workspace\n");
    delete_file(dir, "deleted.txt");
    write_file(dir, "new.txt", "appeared\n");

    repository.diff(false, &[base[..7].to_string()]).unwrap();

    let printed = output.contents();
    assert!(printed.contains(&format!("Diff: Working Directory vs Commit {}", &base[..7])));
    assert!(printed.contains("- from commit"));
    assert!(printed.contains("+ from workspace"));
    assert!(printed.contains("deleted.txt (deleted in WD)"));
    assert!(printed.contains("new.txt (new in WD)"));
}

#[rstest]
fn unknown_commit_arguments_are_rejected(repository_dir: TempDir) {
    let (repository, _output) = init_repository(repository_dir.path());

    let error = repository
        .diff(false, &["feedface".to_string(), "cafebabe".to_string()])
        .unwrap_err();

    assert!(matches!(
        minigit::artifacts::core::errors::RepoError::from_anyhow(&error),
        Some(minigit::artifacts::core::errors::RepoError::UnknownTarget(_))
    ));
}
