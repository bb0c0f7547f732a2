//! Shelling out to git.

use crate::error::{PwError, Result};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Applies an mbox to the working tree.
///
/// Commands depend on this trait rather than on `git am` directly, so
/// tests can observe the apply request without touching a repository.
pub trait PatchApplier {
    fn apply(&self, mbox: &Path, args: &[String]) -> Result<()>;
}

/// Real applier running `git am` in the current directory.
pub struct GitAm;

impl PatchApplier for GitAm {
    fn apply(&self, mbox: &Path, args: &[String]) -> Result<()> {
        let argv = am_arguments(args, mbox);
        debug!("running git {:?}", argv);
        let status = Command::new("git")
            .args(&argv)
            .status()
            .map_err(|err| PwError::Git(err.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(PwError::GitAm(status.code().unwrap_or(1)))
        }
    }
}

/// Extra arguments go between `am` and the mbox path, matching how they
/// were given on our own command line.
fn am_arguments(extra: &[String], mbox: &Path) -> Vec<OsString> {
    let mut argv: Vec<OsString> = vec![OsString::from("am")];
    argv.extend(extra.iter().map(OsString::from));
    argv.push(mbox.as_os_str().to_os_string());
    argv
}

/// Read a single value from git config. Missing keys, empty values and a
/// missing git binary all come back as `None`.
pub fn git_config(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extra_arguments_come_before_the_mbox_path() {
        let mbox = PathBuf::from("/tmp/pwcli-test/series-3.mbox");
        let argv = am_arguments(&["-3".to_string()], &mbox);

        assert_eq!(
            argv,
            vec![
                OsString::from("am"),
                OsString::from("-3"),
                OsString::from("/tmp/pwcli-test/series-3.mbox"),
            ]
        );
    }

    #[test]
    fn a_bare_apply_passes_only_the_mbox() {
        let mbox = PathBuf::from("/tmp/pwcli-test/series-3.mbox");
        let argv = am_arguments(&[], &mbox);

        assert_eq!(argv.len(), 2);
        assert_eq!(argv[0], OsString::from("am"));
    }
}
