use super::messages::{ClientMessage, ErrorCode, ServerMessage};
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;

/// NDJSON Codec - 處理訊息的序列化與反序列化
pub struct Codec {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Codec {
    /// 從 TcpStream 建立 Codec
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let writer = stream.try_clone()?;
        let reader = BufReader::new(stream);
        Ok(Self { reader, writer })
    }

    /// 讀取一行並解析為 ClientMessage
    ///
    /// 無法解析的行回傳 `InvalidData`，該行已被讀掉，可以繼續讀下一行。
    pub fn read_message(&mut self) -> io::Result<Option<ClientMessage>> {
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = self.reader.read_line(&mut line)?;

            if bytes_read == 0 {
                // EOF - 連線關閉
                return Ok(None);
            }

            // 空行，繼續讀取
            if !line.trim().is_empty() {
                break;
            }
        }

        serde_json::from_str(line.trim()).map(Some).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON parse error: {}", e))
        })
    }

    /// 發送 ServerMessage
    pub fn send_message(&mut self, msg: &ServerMessage) -> io::Result<()> {
        let json = serde_json::to_string(msg).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON serialize error: {}", e))
        })?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    /// 發送錯誤訊息
    pub fn send_error(&mut self, code: ErrorCode, message: impl Into<String>) -> io::Result<()> {
        let msg = ServerMessage::Error {
            code,
            message: message.into(),
        };
        self.send_message(&msg)
    }
}
