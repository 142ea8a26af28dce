use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener};

const DEFAULT_BACKLOG: i32 = 128;

/// 建立 TCP listener (SO_REUSEADDR，IPv4/IPv6 皆可)
pub fn create_tcp_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    // 重啟時不必等 TIME_WAIT 結束
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(DEFAULT_BACKLOG)?;

    Ok(socket.into())
}
