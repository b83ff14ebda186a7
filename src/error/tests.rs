// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, GoodleError, GoodleResult, ParseError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "git".to_string(),
        key: "treeless".to_string(),
        message: "cannot be combined with blobless".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'treeless' in section '[git]': cannot be combined with blobless"
    );
}

#[test]
fn test_parse_error_display() {
    let err = ParseError::RemoteKind {
        line: "origin url (pull)".to_string(),
        kind: "(pull)".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"unknown remote url kind '(pull)' in line 'origin url (pull)'"
    );
}

#[test]
fn test_command_exit_code() {
    let err: GoodleError = GitError::CommandFailed {
        command: "git config --local --unset-all foo.bar".to_string(),
        code: 5,
        output: String::new(),
    }
    .into();
    assert_eq!(err.command_exit_code(), Some(5));
    assert_eq!(GoodleError::other("nope").command_exit_code(), None);
}

#[test]
fn test_goodle_error_size() {
    // Box<str> variants are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<GoodleError>();
    assert!(size <= 24, "GoodleError is {size} bytes, expected <= 24");
}

#[test]
fn test_goodle_result_size() {
    let size = std::mem::size_of::<GoodleResult<()>>();
    assert!(size <= 24, "GoodleResult<()> is {size} bytes, expected <= 24");
}
