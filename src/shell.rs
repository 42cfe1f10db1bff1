use std::io::Write;
use std::path::Path;

use fatsim::{Error, Filesystem};

const HELP: &str = "\
commands:
  ls [path]          list a directory
  touch <path>       create an empty file
  mkdir <path>       create a directory
  cp <src> <dest>    copy a local file into the store
  cat <path>         print a file
  rm <path>          remove a file or directory tree
  rmdir <path>       remove a directory
  df                 usage summary
  help               this text
  exit               unmount and quit
";

fn prompt(separator: &str) -> Option<Vec<String>> {
    let mut line = String::new();
    print!("{separator}");
    std::io::stdout().flush().ok()?;
    match std::io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(
            line.trim()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
        Err(_) => None,
    }
}

fn execute(fs: &mut Filesystem, cmd: &[String]) -> Result<(), Error> {
    match (cmd[0].as_str(), &cmd[1..]) {
        ("ls", []) => print!("{}", fs.ls("/")?),
        ("ls", [path]) => print!("{}", fs.ls(path)?),
        ("touch", [path]) => _ = fs.touch(path)?,
        ("mkdir", [path]) => _ = fs.mkdir(path)?,
        ("cp", [src, dest]) => _ = fs.cp(Path::new(src), dest)?,
        ("cat", [path]) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            fs.cat(path, &mut out)?;
            out.flush()?;
        }
        ("rm", [path]) => {
            if !fs.rm(path)? {
                eprintln!("rm: {path}: not found");
            }
        }
        ("rmdir", [path]) => {
            if !fs.rmdir(path)? {
                eprintln!("rmdir: {path}: not found or not a directory");
            }
        }
        ("df", []) => print!("{}", fs.df()?),
        ("help", _) => print!("{HELP}"),
        _ => eprintln!("bad command or arguments, try `help`"),
    }
    Ok(())
}

pub fn run(fs: &mut Filesystem) {
    loop {
        let cmd = match prompt(">> ") {
            Some(cmd) => cmd,
            None => break,
        };
        if cmd.is_empty() {
            continue;
        }
        if cmd[0] == "exit" {
            break;
        }
        if let Err(e) = execute(fs, &cmd) {
            eprintln!("{e}");
        }
    }
}
