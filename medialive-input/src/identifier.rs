// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//! Names for newly created MediaLive inputs.
//!
//! A generated name has the form `<stack name>-<logical id>-<suffix>`. The
//! suffix makes collisions unlikely but not impossible; MediaLive rejects a
//! duplicate name and the create is then reported as failed.

use crate::configs::{ID_ALPHABET, ID_SUFFIX_LENGTH};
use rand::Rng;

/// Returns a random string of `size` characters drawn from `alphabet`.
///
/// # Arguments
/// * `size` - The length of the string.
/// * `alphabet` - The characters to choose from.
pub fn id_generator(size: usize, alphabet: &[char]) -> String {
    if alphabet.is_empty() {
        return String::new();
    }
    let mut rng = rand::thread_rng();
    (0..size)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Extracts the stack name from a CloudFormation stack id.
///
/// Stack ids are ARNs of the form
/// `arn:aws:cloudformation:<region>:<account>:stack/<name>/<guid>`. Anything
/// that is not shaped like that is returned unchanged.
pub fn stack_name(stack_id: &str) -> &str {
    match stack_id.split('/').nth(1) {
        Some(name) if stack_id.starts_with("arn:") && !name.is_empty() => name,
        _ => stack_id,
    }
}

/// Generates the name of a new input owned by the given stack and logical
/// resource.
pub fn physical_id(stack_id: &str, logical_id: &str) -> String {
    format!(
        "{}-{}-{}",
        stack_name(stack_id),
        logical_id,
        id_generator(*ID_SUFFIX_LENGTH, &ID_ALPHABET)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn suffix_uses_alphabet() {
        let alphabet: Vec<char> = "AB".chars().collect();
        let id = id_generator(32, &alphabet);
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c == 'A' || c == 'B'));
        assert_eq!(id_generator(8, &[]), "");
    }

    #[test]
    fn stack_name_from_arn() {
        assert_eq!(
            stack_name("arn:aws:cloudformation:us-east-1:123456789012:stack/live-demo/5b2c4e80-aa11-11e9-8f3b-0a5b2b5c6e3c"),
            "live-demo"
        );
        assert_eq!(stack_name("stk1"), "stk1");
        assert_eq!(stack_name(""), "");
    }

    #[test]
    fn generated_ids() {
        let id = physical_id("stk1", "Input1");
        let suffix = id.strip_prefix("stk1-Input1-").unwrap();
        assert_eq!(suffix.len(), *ID_SUFFIX_LENGTH);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

        let ids: HashSet<String> = (0..100).map(|_| physical_id("stk1", "Input1")).collect();
        assert!(ids.len() > 95);
    }
}
