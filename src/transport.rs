//! UDP transport for encoded sentences.

use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use log::trace;
use tokio::net::{lookup_host, UdpSocket};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured destination did not resolve to any address.
    /// Raised at startup, before any record is read.
    #[error("invalid destination address: {destination}")]
    InvalidDestination { destination: String },

    #[error("socket error: {0}")]
    Io(#[from] io::Error),
}

/// Anything that can carry one encoded sentence to its consumer.
///
/// The replay scheduler owns its sink exclusively for the duration of
/// a run; implementations do not need to be shareable.
#[async_trait]
pub trait SentenceSink: Send {
    /// Deliver a single sentence (without line terminator). A failure
    /// is fatal to the run; the scheduler does not retry.
    async fn send(&mut self, sentence: &str) -> Result<(), TransportError>;
}

/// Sends each sentence as one UDP datagram of US-ASCII bytes with a
/// trailing CRLF.
pub struct UdpSink {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpSink {
    /// Resolve the destination and bind an ephemeral local socket.
    /// An unresolvable destination is a startup error; no partial run
    /// is attempted.
    pub async fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        let destination = lookup_host((host, port))
            .await
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| TransportError::InvalidDestination {
                destination: format!("{}:{}", host, port),
            })?;

        let bind_addr: SocketAddr = if destination.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };
        let socket = UdpSocket::bind(bind_addr).await?;

        Ok(UdpSink {
            socket,
            destination,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }
}

#[async_trait]
impl SentenceSink for UdpSink {
    async fn send(&mut self, sentence: &str) -> Result<(), TransportError> {
        let mut datagram = Vec::with_capacity(sentence.len() + 2);
        datagram.extend_from_slice(sentence.as_bytes());
        datagram.extend_from_slice(b"\r\n");
        self.socket.send_to(&datagram, self.destination).await?;
        trace!("sent {} bytes to {}", datagram.len(), self.destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_destination_is_fatal() {
        let result = UdpSink::connect("no.such.host.invalid", 10110).await;
        assert!(matches!(
            result,
            Err(TransportError::InvalidDestination { .. })
        ));
    }

    #[tokio::test]
    async fn test_datagram_carries_crlf() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut sink = UdpSink::connect("127.0.0.1", port).await.unwrap();
        sink.send("!AIVDM,1,1,,A,0,0*00").await.unwrap();

        let mut buf = [0u8; 128];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"!AIVDM,1,1,,A,0,0*00\r\n");
    }

    #[tokio::test]
    async fn test_destination_resolved_at_startup() {
        let sink = UdpSink::connect("127.0.0.1", 10110).await.unwrap();
        assert_eq!(sink.destination().to_string(), "127.0.0.1:10110");
    }
}
