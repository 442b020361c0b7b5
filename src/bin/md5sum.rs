use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use legacy_md5::{md5, md5_file, md5_reader, Digest};

/// Print or check MD5 (128-bit) checksums.
#[derive(Debug, Parser)]
#[command(name = "md5sum", version, about)]
struct Args {
    /// Files to hash; with none, or when FILE is -, read standard input.
    files: Vec<PathBuf>,

    /// Hash the given string instead of reading files.
    #[arg(short, long, value_name = "TEXT", conflicts_with = "check")]
    string: Option<String>,

    /// Read checksums from the given files and verify them.
    #[arg(short, long)]
    check: bool,

    /// BSD-style output: `MD5 (name) = hex`.
    #[arg(long, conflicts_with = "check")]
    tag: bool,

    /// In check mode, do not print OK for each verified file.
    #[arg(short, long)]
    quiet: bool,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn digest_path(path: &Path) -> legacy_md5::Result<Digest> {
    if is_stdin(path) {
        md5_reader(io::stdin().lock())
    } else {
        md5_file(path)
    }
}

fn print_line(digest: &Digest, name: &str, tag: bool) {
    if tag {
        println!("MD5 ({name}) = {digest}");
    } else {
        println!("{digest}  {name}");
    }
}

/// Splits a `hex  path` or `hex *path` checksum line.
fn parse_check_line(line: &str) -> Option<(Digest, &str)> {
    let (hex, rest) = line.split_once(char::is_whitespace)?;
    let digest = hex.parse().ok()?;
    let name = rest.trim_start_matches(&[' ', '*'][..]);
    if name.is_empty() {
        return None;
    }
    Some((digest, name))
}

fn check_list(reader: impl BufRead, quiet: bool) -> io::Result<usize> {
    let mut failures = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some((expected, name)) = parse_check_line(&line) else {
            eprintln!("md5sum: improperly formatted line: {line}");
            failures += 1;
            continue;
        };
        match md5_file(name) {
            Ok(actual) if actual == expected => {
                if !quiet {
                    println!("{name}: OK");
                }
            }
            Ok(_) => {
                println!("{name}: FAILED");
                failures += 1;
            }
            Err(e) => {
                eprintln!("md5sum: {name}: {e}");
                println!("{name}: FAILED open or read");
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn run(args: Args) -> bool {
    if let Some(text) = &args.string {
        print_line(&md5(text.as_bytes()), &format!("\"{text}\""), args.tag);
        return true;
    }

    let files = if args.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.files
    };

    let mut ok = true;
    for path in &files {
        if args.check {
            let result = if is_stdin(path) {
                check_list(io::stdin().lock(), args.quiet)
            } else {
                File::open(path).and_then(|f| check_list(BufReader::new(f), args.quiet))
            };
            match result {
                Ok(0) => {}
                Ok(n) => {
                    eprintln!("md5sum: WARNING: {n} checksum(s) did NOT match");
                    ok = false;
                }
                Err(e) => {
                    eprintln!("md5sum: {}: {e}", path.display());
                    ok = false;
                }
            }
        } else {
            match digest_path(path) {
                Ok(digest) => print_line(&digest, &path.display().to_string(), args.tag),
                Err(e) => {
                    eprintln!("md5sum: {}: {e}", path.display());
                    ok = false;
                }
            }
        }
    }
    ok
}

fn main() -> ExitCode {
    if run(Args::parse()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
