// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, write_warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Fail early when the output cannot be written, and ask before replacing
/// an existing file unless `force` is set.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    check_parent(path)?;
    if !path.exists() || force {
        return Ok(());
    }

    let stdin = io::stdin();
    if confirm_overwrite(path, stdin.lock(), io::stdout())? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".to_string(),
        ))
    }
}

fn check_parent(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(AppError::Export(
            format!("output directory does not exist: {}", dir.display()),
        )),
        _ => Ok(()),
    }
}

/// `true` only for an explicit y/yes; end of input counts as no.
fn confirm_overwrite<R: BufRead, W: Write>(path: &Path, mut input: R, mut out: W) -> AppResult<bool> {
    write_warning(&mut out, format!("The file '{}' already exists.", path.display()))?;
    write!(out, "Overwrite? [y/N]: ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn only_yes_confirms() {
        let p = Path::new("/tmp/whatever.csv");
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
            let mut out = Vec::new();
            assert_eq!(
                confirm_overwrite(p, answer.as_bytes(), &mut out).unwrap(),
                expected,
                "answer {answer:?}"
            );
            assert!(String::from_utf8(out).unwrap().contains("already exists"));
        }
    }

    #[test]
    fn missing_directory_is_rejected() {
        let p = env::temp_dir().join("taskchart_no_such_dir").join("out.csv");
        assert!(matches!(ensure_writable(&p, true), Err(AppError::Export(_))));
    }

    #[test]
    fn force_overwrites_without_asking() {
        let p = env::temp_dir().join("taskchart_force_overwrite.csv");
        fs::write(&p, "old").unwrap();
        assert!(ensure_writable(&p, true).is_ok());
        fs::remove_file(&p).ok();
    }
}
