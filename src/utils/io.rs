use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Read non-blank lines, trimmed, until EOF
pub async fn read_lines<R: AsyncRead + Unpin>(reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut out = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }

    Ok(out)
}

/// Write all bytes or fail
pub async fn write_all<W: AsyncWrite + Unpin>(
    writer: &mut W,
    buf: &[u8],
) -> std::io::Result<()> {
    writer.write_all(buf).await?;
    writer.flush().await?;
    Ok(())
}
