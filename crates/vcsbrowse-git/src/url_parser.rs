//! Git remote URL parsing.
//!
//! Accepts the forms git itself accepts for hosted remotes and reduces them
//! to a [`RemoteDescriptor`]:
//!
//! - `https://host/owner/project(.git)` and `http://...`
//! - `user@host:owner/project(.git)` (scp-like SSH)
//! - `ssh://user@host[:port]/owner/project(.git)`
//! - `git://host/owner/project`, `git+https://...`, `git+ssh://...`

use url::Url;

use vcsbrowse_core::{ParseError, RemoteDescriptor};

/// Parse a git remote URL and normalize it.
///
/// Handles scp-like SSH syntax (`git@host:owner/repo`) and standard URLs.
/// The scp form requires a `user@` part; without it the string is a local
/// path to git.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or uses an unsupported scheme.
pub fn parse_url(raw_url: &str) -> Result<Url, ParseError> {
    let invalid = || ParseError::new(raw_url);
    let raw = raw_url.trim();

    // Normalize scheme aliases at the string level first, because the `url`
    // crate refuses `set_scheme` transitions between special and non-special
    // schemes (e.g., `git+https` -> `https`).
    let pre_normalized = if raw.starts_with("git+https:") {
        raw.replacen("git+https:", "https:", 1)
    } else if raw.starts_with("git+ssh:") {
        raw.replacen("git+ssh:", "ssh:", 1)
    } else {
        raw.to_string()
    };

    let normalized = if is_possible_protocol(&pre_normalized) {
        if !is_supported_protocol(&pre_normalized) {
            return Err(invalid());
        }
        pre_normalized
    } else {
        scp_to_ssh(&pre_normalized).ok_or_else(invalid)?
    };

    let mut u = Url::parse(&normalized).map_err(|_| invalid())?;

    if u.scheme() == "ssh" {
        // Remove leading double slashes from path
        let path = u.path().to_string();
        if path.starts_with("//") {
            u.set_path(path.trim_start_matches('/'));
        }
    }

    Ok(u)
}

/// Parse a remote URL into a descriptor of the hosted repository.
///
/// # Errors
///
/// Returns [`ParseError`] when the string matches none of the supported forms
/// or lacks an owner and project.
pub fn parse_remote_url(raw_url: &str) -> Result<RemoteDescriptor, ParseError> {
    let u = parse_url(raw_url)?;
    RemoteDescriptor::from_url(&u).map_err(|_| ParseError::new(raw_url))
}

/// `user@host:path` -> `ssh://user@host/path`.
fn scp_to_ssh(s: &str) -> Option<String> {
    if s.contains('\\') {
        return None;
    }
    let (user_host, path) = s.split_once(':')?;
    let (user, host) = user_host.split_once('@')?;
    if user.is_empty() || host.is_empty() || path.is_empty() || host.contains('/') {
        return None;
    }
    Some(format!("ssh://{user_host}/{path}"))
}

fn is_supported_protocol(u: &str) -> bool {
    u.starts_with("ssh:")
        || u.starts_with("git:")
        || u.starts_with("http:")
        || u.starts_with("https:")
}

fn is_possible_protocol(u: &str) -> bool {
    is_supported_protocol(u)
        || u.starts_with("ftp:")
        || u.starts_with("ftps:")
        || u.starts_with("file:")
}
