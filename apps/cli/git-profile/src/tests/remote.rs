// Unit tests for GitHub remote URL parsing

use crate::error::GitProfileError;
use crate::remote::parse_github_remote;

fn parsed(url: &str) -> (String, String) {
    parse_github_remote(url).unwrap()
}

/// **VALUE**: Every remote form GitHub offers yields the same owner and repository.
///
/// **WHY THIS MATTERS**: Users paste whatever `git remote -v` prints; https and ssh
/// clones of one repository must show the same statistics.
///
/// **BUG THIS CATCHES**: Would catch `.git` leaking into the repository name or the
/// scp-style `:` separator not being accepted.
#[test]
fn given_https_and_ssh_remotes_when_parsed_then_owner_and_repo_match() {
    let expected = ("octo".to_string(), "hello".to_string());

    assert_eq!(parsed("https://github.com/octo/hello.git"), expected);
    assert_eq!(parsed("https://github.com/octo/hello"), expected);
    assert_eq!(parsed("git@github.com:octo/hello.git"), expected);
    assert_eq!(parsed("ssh://git@github.com/octo/hello.git"), expected);
    assert_eq!(parsed("https://github.com/octo/hello/"), expected);
}

#[test]
fn given_surrounding_whitespace_when_parsed_then_trimmed() {
    assert_eq!(
        parsed("  https://github.com/octo/hello.git\n"),
        ("octo".to_string(), "hello".to_string())
    );
}

#[test]
fn given_repository_with_dots_when_parsed_then_only_git_suffix_removed() {
    assert_eq!(
        parsed("git@github.com:octo/hello.world.git"),
        ("octo".to_string(), "hello.world".to_string())
    );
}

/// **VALUE**: Non-GitHub remotes are a configuration error, not a request to
/// api.github.com with garbage coordinates.
///
/// **BUG THIS CATCHES**: Would catch a pattern loose enough to accept other hosts.
#[test]
fn given_non_github_remote_when_parsed_then_not_configured() {
    for url in [
        "https://gitlab.com/octo/hello.git",
        "https://github.com/octo",
        "https://github.com/octo/hello/tree/main",
        "",
    ] {
        let err = parse_github_remote(url).unwrap_err();
        assert!(
            matches!(err, GitProfileError::NotConfigured { .. }),
            "{url:?} should be rejected, got {err:?}"
        );
    }
}
