use anyhow::Result;
use clap::{Parser, Subcommand};
use minigit::Repository;

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    about = "A miniature git-style version control engine",
    long_about = "minigit models the essential Git object model: content-addressed \
    blobs, commit snapshots, branches, a staging area, and working-directory \
    checkout. It operates on the current directory and keeps all state under \
    a .minigit subdirectory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository in the current directory")]
    Init,
    #[command(name = "add", about = "Add a file's current content to the staging area")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(required = true, help = "The commit message (words are joined with spaces)")]
        message: Vec<String>,
    },
    #[command(name = "log", about = "Show the commit history from HEAD")]
    Log,
    #[command(name = "branch", about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "checkout", about = "Switch branches or restore working tree files")]
    Checkout {
        #[arg(index = 1, help = "A branch name, commit digest, or digest prefix")]
        target: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "diff", about = "Show changes between commits, staging, or working tree")]
    Diff {
        #[arg(long, alias = "cached", help = "Compare the staging area against HEAD")]
        staged: bool,
        #[arg(num_args = 0..=2, help = "Zero, one, or two commit digests")]
        targets: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // usage errors exit 1; --help and --version exit 0
            let code = if error.use_stderr() { 1 } else { 0 };
            error.print()?;
            std::process::exit(code);
        }
    };

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { path } => repository.add(path)?,
        Commands::Commit { message } => repository.commit(&message.join(" "))?,
        Commands::Log => repository.log()?,
        Commands::Branch { name } => repository.branch(name)?,
        Commands::Checkout { target } => repository.checkout(target)?,
        Commands::Status => repository.status()?,
        Commands::Diff { staged, targets } => repository.diff(*staged, targets)?,
    }

    Ok(())
}
