use crate::client::ApiClient;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Fetch an mbox, either into an explicit output file or into a fresh
/// temporary directory under the name the server assigned.
///
/// With an output path the body is fetched as text and written verbatim;
/// without one the transport saves the file itself and reports where it
/// put it.
pub fn save_mbox<C: ApiClient>(
    client: &C,
    mbox_url: &str,
    output: Option<&Path>,
) -> Result<PathBuf> {
    match output {
        Some(path) => {
            let text = client.get_text(mbox_url)?;
            fs::write(path, text)?;
            Ok(path.to_path_buf())
        }
        None => client.download(mbox_url),
    }
}
