// src/hook.rs
// =============================================================================
// This module parses wiki parser-function arguments into a RenderRequest.
//
// A wiki page embeds a file like this:
//
//   {{#github: docs/intro.md | repo = owner/project | branch = main }}
//
// The host hands us everything after the colon:
//
//   "docs/intro.md | repo = owner/project | branch = main"
//
// Rules:
// - Arguments are separated by '|'
// - "name=value" sets a named parameter (file, repo, branch)
// - A bare value is the file name (only one allowed)
// - file defaults to README.md, branch to the configured default
// - repo has no default
// =============================================================================

use thiserror::Error;

use crate::render::RenderRequest;

pub const DEFAULT_FILE: &str = "README.md";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("parameter '{0}' given more than once")]
    DuplicateParameter(&'static str),

    #[error("parameter '{0}' is empty")]
    EmptyParameter(&'static str),

    #[error("unexpected positional argument '{0}'")]
    ExtraPositional(String),
}

// Parameters as they are collected, before defaults are applied
#[derive(Default)]
struct HookParams {
    file: Option<String>,
    repo: Option<String>,
    branch: Option<String>,
}

impl HookParams {
    fn slot(&mut self, name: &str) -> Result<(&'static str, &mut Option<String>), HookError> {
        match name {
            "file" => Ok(("file", &mut self.file)),
            "repo" => Ok(("repo", &mut self.repo)),
            "branch" => Ok(("branch", &mut self.branch)),
            other => Err(HookError::UnknownParameter(other.to_string())),
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), HookError> {
        let (name, slot) = self.slot(name)?;

        if value.is_empty() {
            return Err(HookError::EmptyParameter(name));
        }
        if slot.is_some() {
            return Err(HookError::DuplicateParameter(name));
        }

        *slot = Some(value.to_string());
        Ok(())
    }
}

// Parses parser-function arguments
//
// Example:
//   parse_hook_args("script.py|repo=foo|branch=main", "master")
//   -> RenderRequest { file_name: "script.py", repo_name: "foo", branch_name: "main" }
pub fn parse_hook_args(input: &str, default_branch: &str) -> Result<RenderRequest, HookError> {
    let mut params = HookParams::default();
    let mut positional_seen = false;

    for arg in input.split('|').map(str::trim) {
        if arg.is_empty() {
            continue;
        }

        match arg.split_once('=') {
            Some((name, value)) => params.set(name.trim(), value.trim())?,
            None if !positional_seen => {
                positional_seen = true;
                params.set("file", arg)?;
            }
            None => return Err(HookError::ExtraPositional(arg.to_string())),
        }
    }

    let repo = params.repo.ok_or(HookError::MissingParameter("repo"))?;
    let branch = params.branch.unwrap_or_else(|| default_branch.to_string());
    let file = params.file.unwrap_or_else(|| DEFAULT_FILE.to_string());

    Ok(RenderRequest::new(repo, branch, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_parameters() {
        let request = parse_hook_args("file=script.py|repo=foo|branch=main", "master").unwrap();
        assert_eq!(request, RenderRequest::new("foo", "main", "script.py"));
    }

    #[test]
    fn test_positional_file_and_whitespace() {
        let request =
            parse_hook_args(" docs/intro.md | repo = owner/project | branch = dev ", "master")
                .unwrap();
        assert_eq!(request, RenderRequest::new("owner/project", "dev", "docs/intro.md"));
    }

    #[test]
    fn test_defaults() {
        let request = parse_hook_args("repo=foo", "master").unwrap();
        assert_eq!(request, RenderRequest::new("foo", "master", "README.md"));
    }

    #[test]
    fn test_missing_repo() {
        let err = parse_hook_args("README.md|branch=main", "master").unwrap_err();
        assert_eq!(err, HookError::MissingParameter("repo"));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = parse_hook_args("repo=foo|lang=rust", "master").unwrap_err();
        assert_eq!(err, HookError::UnknownParameter("lang".to_string()));
    }

    #[test]
    fn test_duplicate_file() {
        let err = parse_hook_args("a.rs|file=b.rs|repo=foo", "master").unwrap_err();
        assert_eq!(err, HookError::DuplicateParameter("file"));
    }

    #[test]
    fn test_empty_value() {
        let err = parse_hook_args("repo=foo|branch=", "master").unwrap_err();
        assert_eq!(err.to_string(), "parameter 'branch' is empty");
    }

    #[test]
    fn test_extra_positional() {
        let err = parse_hook_args("a.rs|b.rs|repo=foo", "master").unwrap_err();
        assert_eq!(err, HookError::ExtraPositional("b.rs".to_string()));
    }
}
