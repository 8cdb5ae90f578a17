//! Provider URL templates.
//!
//! [`resolve`] turns a [`RemoteDescriptor`] and a [`PageRequest`] into the
//! provider's web URL for that page. Path segments are percent-encoded one
//! by one so `/` in branch names and file paths survives; query values are
//! encoded whole.

use tracing::debug;

use crate::errors::UnsupportedOperation;
use crate::page::{FileTarget, LineRange, PageRequest};
use crate::provider::Provider;
use crate::repo::RemoteDescriptor;
use crate::weburl::WebUrl;

/// Resolve a page request against a remote.
///
/// # Errors
///
/// Returns [`UnsupportedOperation`] when the provider has no page of the
/// requested kind.
pub fn resolve(
    remote: &RemoteDescriptor,
    request: &PageRequest,
) -> Result<WebUrl, UnsupportedOperation> {
    let root = remote.root_url();
    let unsupported = || UnsupportedOperation {
        kind: request.kind(),
        provider: remote.provider(),
        wiki: remote.is_wiki(),
    };

    if let PageRequest::Root = request {
        return Ok(root_page(remote));
    }

    let url = if remote.is_wiki() {
        wiki_url(&root, request).ok_or_else(unsupported)?
    } else {
        match remote.provider() {
            Provider::GitHub => github_url(&root, request),
            Provider::GitLab => gitlab_url(&root, request),
            Provider::Bitbucket => bitbucket_url(&root, request),
            Provider::Unknown => return Err(unsupported()),
        }
    };

    debug!(kind = %request.kind(), provider = %remote.provider(), %url, "resolved page");
    Ok(WebUrl::new(url))
}

/// The repository front page. Every provider has one.
pub fn root_page(remote: &RemoteDescriptor) -> WebUrl {
    WebUrl::new(remote.root_url())
}

fn github_url(root: &str, request: &PageRequest) -> String {
    match request {
        PageRequest::Root => root.to_string(),
        PageRequest::Tree { branch } => format!("{root}/tree/{}", encode_path(branch)),
        PageRequest::Commit { revision } => format!("{root}/commit/{}", encode_path(revision)),
        PageRequest::Log { branch } => format!("{root}/commits/{}", encode_path(branch)),
        PageRequest::File { revision, target } => {
            format!("{root}/blob/{}", file_suffix(revision, target, github_anchor))
        }
        PageRequest::Blame { revision, target } => {
            format!("{root}/blame/{}", file_suffix(revision, target, github_anchor))
        }
        PageRequest::Diff { base, head } => {
            format!("{root}/compare/{}...{}", encode_path(base), encode_path(head))
        }
        PageRequest::PullRequest { branch } => format!("{root}/pull/new/{}", encode_path(branch)),
    }
}

fn gitlab_url(root: &str, request: &PageRequest) -> String {
    match request {
        PageRequest::File { revision, target } => {
            format!("{root}/blob/{}", file_suffix(revision, target, gitlab_anchor))
        }
        PageRequest::Blame { revision, target } => {
            format!("{root}/blame/{}", file_suffix(revision, target, gitlab_anchor))
        }
        PageRequest::PullRequest { branch } => format!(
            "{root}/merge_requests/new?merge_request%5Bsource_branch%5D={}",
            urlencoding::encode(branch)
        ),
        // Tree, commit, log and compare pages share GitHub's layout.
        _ => github_url(root, request),
    }
}

fn bitbucket_url(root: &str, request: &PageRequest) -> String {
    match request {
        PageRequest::Root => root.to_string(),
        PageRequest::Tree { branch } => format!("{root}/src/{}", encode_path(branch)),
        PageRequest::Commit { revision } => format!("{root}/commits/{}", encode_path(revision)),
        PageRequest::Log { branch } => format!("{root}/commits/branch/{}", encode_path(branch)),
        PageRequest::File { revision, target } => {
            format!("{root}/src/{}", file_suffix(revision, target, bitbucket_anchor))
        }
        PageRequest::Blame { revision, target } => format!(
            "{root}/annotate/{}",
            file_suffix(revision, target, bitbucket_anchor)
        ),
        PageRequest::Diff { base, head } => format!(
            "{root}/branches/compare/{}%0D{}#diff",
            encode_path(base),
            encode_path(head)
        ),
        PageRequest::PullRequest { branch } => format!(
            "{root}/pull-requests/new?source={}",
            urlencoding::encode(branch)
        ),
    }
}

/// GitLab wikis only have pages, addressed by path without extension.
fn wiki_url(root: &str, request: &PageRequest) -> Option<String> {
    let PageRequest::File { revision, target } = request else {
        return None;
    };

    let page = encode_path(&wiki_page_name(&target.path));
    if is_commit_hash(revision) {
        Some(format!("{root}/{page}?version_id={revision}"))
    } else {
        Some(format!("{root}/{page}"))
    }
}

fn wiki_page_name(path: &str) -> &str {
    let (dir_len, file) = match path.rfind('/') {
        Some(i) => (i + 1, &path[i + 1..]),
        None => (0, path),
    };
    match file.rfind('.') {
        Some(dot) if dot > 0 => &path[..dir_len + dot],
        _ => path,
    }
}

fn file_suffix(revision: &str, target: &FileTarget, anchor: fn(LineRange) -> String) -> String {
    let mut suffix = format!("{}/{}", encode_path(revision), encode_path(&target.path));
    if let Some(lines) = target.lines {
        suffix.push('#');
        suffix.push_str(&anchor(lines));
    }
    suffix
}

fn github_anchor(lines: LineRange) -> String {
    match lines {
        LineRange::Single(n) => format!("L{n}"),
        LineRange::Span(a, b) => format!("L{a}-L{b}"),
    }
}

fn gitlab_anchor(lines: LineRange) -> String {
    match lines {
        LineRange::Single(n) => format!("L{n}"),
        LineRange::Span(a, b) => format!("L{a}-{b}"),
    }
}

fn bitbucket_anchor(lines: LineRange) -> String {
    match lines {
        LineRange::Single(n) => format!("lines-{n}"),
        LineRange::Span(a, b) => format!("lines-{a}:{b}"),
    }
}

/// Percent-encode each `/`-separated segment.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Full SHA-1 or SHA-256 object name.
fn is_commit_hash(revision: &str) -> bool {
    matches!(revision.len(), 40 | 64) && revision.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::page::PageKind;

    const SHA: &str = "55150afe539493d650889224db136bc8d9b7ecb8";

    fn github() -> RemoteDescriptor {
        RemoteDescriptor::new("github.com", "USER", "PROJECT")
    }

    fn gitlab() -> RemoteDescriptor {
        RemoteDescriptor::new("gitlab.com", "USER", "PROJECT")
    }

    fn bitbucket() -> RemoteDescriptor {
        RemoteDescriptor::new("bitbucket.org", "USER", "PROJECT")
    }

    fn gitlab_wiki() -> RemoteDescriptor {
        RemoteDescriptor::new("gitlab.com", "USER", "PROJECT.wiki")
    }

    fn file(revision: &str, path: &str, lines: Option<LineRange>) -> PageRequest {
        PageRequest::File {
            revision: revision.to_string(),
            target: FileTarget::new(path).with_lines(lines),
        }
    }

    fn blame(revision: &str, path: &str, lines: Option<LineRange>) -> PageRequest {
        PageRequest::Blame {
            revision: revision.to_string(),
            target: FileTarget::new(path).with_lines(lines),
        }
    }

    fn url(remote: &RemoteDescriptor, request: &PageRequest) -> String {
        resolve(remote, request).unwrap().to_string()
    }

    #[test]
    fn test_should_resolve_github_file_with_lines() {
        let request = file(SHA, "setup.py", Some(LineRange::Span(5, 10)));
        assert_eq!(
            url(&github(), &request),
            format!("https://github.com/USER/PROJECT/blob/{SHA}/setup.py#L5-L10")
        );
    }

    #[rstest]
    #[case(None, "https://github.com/USER/PROJECT/blob/master/README.md")]
    #[case(
        Some(LineRange::Single(1)),
        "https://github.com/USER/PROJECT/blob/master/README.md#L1"
    )]
    #[case(
        Some(LineRange::Span(1, 2)),
        "https://github.com/USER/PROJECT/blob/master/README.md#L1-L2"
    )]
    fn test_should_resolve_github_file(#[case] lines: Option<LineRange>, #[case] expected: &str) {
        assert_eq!(url(&github(), &file("master", "README.md", lines)), expected);
    }

    #[rstest]
    #[case(None, "https://gitlab.com/USER/PROJECT/blob/master/README.md")]
    #[case(
        Some(LineRange::Single(1)),
        "https://gitlab.com/USER/PROJECT/blob/master/README.md#L1"
    )]
    #[case(
        Some(LineRange::Span(1, 2)),
        "https://gitlab.com/USER/PROJECT/blob/master/README.md#L1-2"
    )]
    fn test_should_resolve_gitlab_file(#[case] lines: Option<LineRange>, #[case] expected: &str) {
        assert_eq!(url(&gitlab(), &file("master", "README.md", lines)), expected);
    }

    #[rstest]
    #[case(None, "https://bitbucket.org/USER/PROJECT/src/master/README.md")]
    #[case(
        Some(LineRange::Single(1)),
        "https://bitbucket.org/USER/PROJECT/src/master/README.md#lines-1"
    )]
    #[case(
        Some(LineRange::Span(1, 2)),
        "https://bitbucket.org/USER/PROJECT/src/master/README.md#lines-1:2"
    )]
    fn test_should_resolve_bitbucket_file(
        #[case] lines: Option<LineRange>,
        #[case] expected: &str,
    ) {
        assert_eq!(
            url(&bitbucket(), &file("master", "README.md", lines)),
            expected
        );
    }

    #[rstest]
    #[case(github(), "https://github.com/USER/PROJECT/commit/abc123")]
    #[case(gitlab(), "https://gitlab.com/USER/PROJECT/commit/abc123")]
    #[case(bitbucket(), "https://bitbucket.org/USER/PROJECT/commits/abc123")]
    fn test_should_resolve_commit(#[case] remote: RemoteDescriptor, #[case] expected: &str) {
        let request = PageRequest::Commit {
            revision: "abc123".into(),
        };
        assert_eq!(url(&remote, &request), expected);
    }

    #[rstest]
    #[case(github(), "https://github.com/USER/PROJECT/commits/dev")]
    #[case(gitlab(), "https://gitlab.com/USER/PROJECT/commits/dev")]
    #[case(bitbucket(), "https://bitbucket.org/USER/PROJECT/commits/branch/dev")]
    fn test_should_resolve_log(#[case] remote: RemoteDescriptor, #[case] expected: &str) {
        let request = PageRequest::Log {
            branch: "dev".into(),
        };
        assert_eq!(url(&remote, &request), expected);
    }

    #[rstest]
    #[case(github(), "https://github.com/USER/PROJECT/tree/feature/x")]
    #[case(gitlab(), "https://gitlab.com/USER/PROJECT/tree/feature/x")]
    #[case(bitbucket(), "https://bitbucket.org/USER/PROJECT/src/feature/x")]
    fn test_should_resolve_tree(#[case] remote: RemoteDescriptor, #[case] expected: &str) {
        let request = PageRequest::Tree {
            branch: "feature/x".into(),
        };
        assert_eq!(url(&remote, &request), expected);
    }

    #[rstest]
    #[case(github(), "https://github.com/USER/PROJECT/compare/master...dev")]
    #[case(gitlab(), "https://gitlab.com/USER/PROJECT/compare/master...dev")]
    #[case(
        bitbucket(),
        "https://bitbucket.org/USER/PROJECT/branches/compare/master%0Ddev#diff"
    )]
    fn test_should_resolve_diff(#[case] remote: RemoteDescriptor, #[case] expected: &str) {
        let request = PageRequest::Diff {
            base: "master".into(),
            head: "dev".into(),
        };
        assert_eq!(url(&remote, &request), expected);
    }

    #[rstest]
    #[case(github(), "https://github.com/USER/PROJECT/blame/dev/src/lib.rs#L3-L4")]
    #[case(gitlab(), "https://gitlab.com/USER/PROJECT/blame/dev/src/lib.rs#L3-4")]
    #[case(
        bitbucket(),
        "https://bitbucket.org/USER/PROJECT/annotate/dev/src/lib.rs#lines-3:4"
    )]
    fn test_should_resolve_blame(#[case] remote: RemoteDescriptor, #[case] expected: &str) {
        let request = blame("dev", "src/lib.rs", Some(LineRange::Span(3, 4)));
        assert_eq!(url(&remote, &request), expected);
    }

    #[rstest]
    #[case(github(), "https://github.com/USER/PROJECT/pull/new/master")]
    #[case(
        gitlab(),
        "https://gitlab.com/USER/PROJECT/merge_requests/new?merge_request%5Bsource_branch%5D=master"
    )]
    #[case(
        bitbucket(),
        "https://bitbucket.org/USER/PROJECT/pull-requests/new?source=master"
    )]
    fn test_should_resolve_pull_request(
        #[case] remote: RemoteDescriptor,
        #[case] expected: &str,
    ) {
        let request = PageRequest::PullRequest {
            branch: "master".into(),
        };
        assert_eq!(url(&remote, &request), expected);
    }

    #[test]
    fn test_should_encode_query_branch() {
        let request = PageRequest::PullRequest {
            branch: "feature/a b".into(),
        };
        assert_eq!(
            url(&bitbucket(), &request),
            "https://bitbucket.org/USER/PROJECT/pull-requests/new?source=feature%2Fa%20b"
        );
    }

    #[test]
    fn test_should_encode_path_segments() {
        let request = file("main", "docs/my file#1.md", None);
        assert_eq!(
            url(&github(), &request),
            "https://github.com/USER/PROJECT/blob/main/docs/my%20file%231.md"
        );
    }

    #[test]
    fn test_should_resolve_root_for_every_provider() {
        for (remote, expected) in [
            (github(), "https://github.com/USER/PROJECT"),
            (gitlab_wiki(), "https://gitlab.com/USER/PROJECT/wikis"),
            (
                RemoteDescriptor::new("git.example.com", "USER", "PROJECT"),
                "https://git.example.com/USER/PROJECT",
            ),
        ] {
            assert_eq!(url(&remote, &PageRequest::Root), expected);
        }
    }

    #[test]
    fn test_should_resolve_gitlab_wiki_page() {
        let wiki = gitlab_wiki();
        let root = "https://gitlab.com/USER/PROJECT/wikis";

        assert_eq!(
            url(&wiki, &file("master", "README.md", None)),
            format!("{root}/README")
        );
        assert_eq!(
            url(&wiki, &file(SHA, "README.md", Some(LineRange::Span(1, 2)))),
            format!("{root}/README?version_id={SHA}")
        );
        assert_eq!(
            url(&wiki, &file("master", "guides/Setup.md", None)),
            format!("{root}/guides/Setup")
        );
    }

    #[rstest]
    #[case(PageRequest::Commit { revision: SHA.into() })]
    #[case(PageRequest::Log { branch: "master".into() })]
    #[case(PageRequest::PullRequest { branch: "master".into() })]
    #[case(blame("master", "README.md", None))]
    fn test_should_reject_unsupported_wiki_pages(#[case] request: PageRequest) {
        let err = resolve(&gitlab_wiki(), &request).unwrap_err();
        assert_eq!(err.kind, request.kind());
        assert!(err.wiki);
    }

    #[test]
    fn test_should_reject_non_root_pages_on_unknown_provider() {
        let remote = RemoteDescriptor::new("git.example.com", "USER", "PROJECT");
        let err = resolve(&remote, &file("main", "README.md", None)).unwrap_err();
        assert_eq!(err.kind, PageKind::File);
        assert_eq!(err.provider, Provider::Unknown);
    }

    #[rstest]
    #[case("README.md", "README")]
    #[case("docs/Setup.md", "docs/Setup")]
    #[case("Home", "Home")]
    #[case(".hidden", ".hidden")]
    #[case("a.b/page", "a.b/page")]
    fn test_should_strip_wiki_extension(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(wiki_page_name(path), expected);
    }

    #[test]
    fn test_should_detect_commit_hashes() {
        assert!(is_commit_hash(SHA));
        assert!(!is_commit_hash("master"));
        assert!(!is_commit_hash("55150afe"));
    }

    // --- property-based tests ---

    mod prop {
        use proptest::prelude::*;

        use super::super::*;

        fn remotes() -> impl Strategy<Value = RemoteDescriptor> {
            prop_oneof![
                Just(RemoteDescriptor::new("github.com", "o", "p")),
                Just(RemoteDescriptor::new("gitlab.com", "o", "p")),
                Just(RemoteDescriptor::new("bitbucket.org", "o", "p")),
            ]
        }

        proptest! {
            #[test]
            fn file_line_range_roundtrips(
                remote in remotes(),
                start in 1u32..10_000,
                len in 0u32..500,
                single in any::<bool>(),
            ) {
                let lines = if single {
                    LineRange::single(start).unwrap()
                } else {
                    LineRange::span(start, start + len).unwrap()
                };
                let request = PageRequest::File {
                    revision: "main".to_string(),
                    target: FileTarget::new("src/lib.rs").with_lines(Some(lines)),
                };
                let url = resolve(&remote, &request).unwrap();
                prop_assert_eq!(url.line_range(), Some(lines));
            }
        }
    }
}
