//! Printing of command results.

use std::io::Write;

use futures_util::StreamExt;
use serde::Serialize;

use crate::cli::CliError;
use crate::rpc::ResponseStream;

/// Pretty JSON, byte fields in base 16.
pub fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Print each streamed element between numbered separators, then the count.
///
/// Elements already received are printed before a failure is returned.
pub async fn print_stream<W: Write, T: Serialize>(
    out: &mut W,
    mut stream: ResponseStream<T>,
    element_name: &str,
) -> Result<usize, CliError> {
    let mut count = 0;
    while let Some(item) = stream.next().await {
        let item = item?;
        writeln!(out, "------------- {} {} ---------------", element_name, count)?;
        print_json(out, &item)?;
        writeln!(out, "-----------------------------------------------------\n")?;
        count += 1;
    }
    writeln!(out, "count: {}", count)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::proto::control::ProposeResponse;

    #[test]
    fn json_uses_hex_bytes() {
        let mut out = Vec::new();
        print_json(&mut out, &ProposeResponse { block_hash: vec![0xab, 0x01] }).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"block_hash\": \"ab01\"\n}\n"
        );
    }

    #[tokio::test]
    async fn stream_output_is_numbered_and_counted() {
        let responses = ResponseStream::from_stream(futures_util::stream::iter(vec![
            Ok(ProposeResponse { block_hash: vec![1] }),
            Ok(ProposeResponse { block_hash: vec![2] }),
        ]));
        let mut out = Vec::new();
        let count = print_stream(&mut out, responses, "block").await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 2);
        assert!(text.contains("------------- block 0 ---------------"));
        assert!(text.contains("------------- block 1 ---------------"));
        assert!(text.ends_with("count: 2\n"));
    }

    #[tokio::test]
    async fn stream_failure_stops_printing() {
        let responses = ResponseStream::from_stream(futures_util::stream::iter(vec![
            Ok(ProposeResponse { block_hash: vec![1] }),
            Err(ClientError::Remote {
                code: tonic::Code::Internal,
                details: "boom".into(),
            }),
        ]));
        let mut out = Vec::new();
        let err = print_stream(&mut out, responses, "deploy").await.unwrap_err();
        assert_eq!(err.to_string(), "Internal: boom");
        assert!(!String::from_utf8(out).unwrap().contains("count:"));
    }
}
