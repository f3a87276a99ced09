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
use lambda_runtime::Context;
use medialive_input::prelude::*;

/// Extracts what the lifecycle dispatcher needs from the Lambda context.
pub fn invocation_context(ctx: &Context) -> InvocationContext {
    from_parts(&ctx.request_id, &ctx.env_config.log_stream, ctx.deadline)
}

fn from_parts(request_id: &str, log_stream_name: &str, deadline: u64) -> InvocationContext {
    InvocationContext {
        request_id:      request_id.to_owned(),
        log_stream_name: log_stream_name.to_owned(),
        // The runtime reports no deadline as zero.
        deadline:        if deadline == 0 { None } else { Some(deadline) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_mapping() {
        let ctx = from_parts("req-1", "2021/01/01/[$LATEST]abcdef", 1_600_000_000_000);
        assert_eq!(ctx.request_id, "req-1");
        assert_eq!(ctx.log_stream_name, "2021/01/01/[$LATEST]abcdef");
        assert_eq!(ctx.deadline, Some(1_600_000_000_000));

        assert_eq!(from_parts("req-2", "", 0).deadline, None);
    }
}
