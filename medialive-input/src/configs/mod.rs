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
//! Configuration settings of the MediaLive input custom resource.

use ini::Ini;
use lazy_static::lazy_static;

lazy_static! {
    /// Global settings.
    pub static ref INPUT_CONF: Ini = Ini::load_from_str(include_str!("./config.toml")).unwrap();

    /// MediaLive input type requested for every created input.
    pub static ref MEDIALIVE_INPUT_TYPE: String = INPUT_CONF["medialive"]["input_type"].to_string();

    /// Length of the random suffix of generated input names.
    pub static ref ID_SUFFIX_LENGTH: usize = INPUT_CONF["identifier"]["suffix_length"].parse::<usize>().unwrap();
    /// Characters the random suffix is drawn from.
    pub static ref ID_ALPHABET: Vec<char> = INPUT_CONF["identifier"]["alphabet"].chars().collect();

    /// Leading text of the `Reason` field sent back to CloudFormation.
    pub static ref RESPONSE_REASON_PREFIX: String = format!("{} ", INPUT_CONF["cloudformation"]["reason_prefix"].trim_end());

    /// Milliseconds kept in reserve before the Lambda deadline so that the
    /// response can still be delivered.
    pub static ref DEADLINE_MARGIN_MS: u64 = INPUT_CONF["lambda"]["deadline_margin_ms"].parse::<u64>().unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_shows() {
        let conf = Ini::load_from_str(include_str!("./config.toml")).unwrap();

        for (sec, prop) in &conf {
            println!("Section: {:?}", sec);
            for (key, value) in prop.iter() {
                println!("{:?}:{:?}", key, value);
            }
        }

        assert_eq!("URL_PULL", *MEDIALIVE_INPUT_TYPE);
        assert_eq!(6, *ID_SUFFIX_LENGTH);
        assert_eq!(36, ID_ALPHABET.len());
        assert_eq!(
            "See the details in CloudWatch Log Stream: ",
            *RESPONSE_REASON_PREFIX
        );
        assert_eq!(2000, *DEADLINE_MARGIN_MS);
    }
}
