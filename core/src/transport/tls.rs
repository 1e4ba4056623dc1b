//! TLS transport built on tokio-rustls
//!
//! Dials a TCP connection under a timeout, then performs a rustls
//! handshake. Reads and writes are bounded by a per-connection IO
//! timeout so a stalled peer cannot hold a worker past its deadline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::ServerName;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use super::{Connection, Transport, TransportError};

static CRYPTO_PROVIDER: Lazy<Arc<CryptoProvider>> =
    Lazy::new(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()));

/// TLS connection factory
#[derive(Clone)]
pub struct TlsTransport {
    config: Arc<ClientConfig>,
    io_timeout: Duration,
}

impl TlsTransport {
    /// Build a transport that verifies server certificates against the
    /// system root store
    pub fn new(io_timeout: Duration) -> Result<Self, TransportError> {
        let mut roots = RootCertStore::empty();
        let certs =
            rustls_native_certs::load_native_certs().map_err(TransportError::NativeRoots)?;
        roots.add_parsable_certificates(certs);

        let config = ClientConfig::builder_with_provider(CRYPTO_PROVIDER.clone())
            .with_safe_default_protocol_versions()?
            .with_root_certificates(roots)
            .with_no_client_auth();

        Ok(Self {
            config: Arc::new(config),
            io_timeout,
        })
    }

    /// Build a transport that accepts any server certificate
    ///
    /// Only suitable for targets with self-signed certificates.
    pub fn insecure(io_timeout: Duration) -> Result<Self, TransportError> {
        let config = ClientConfig::builder_with_provider(CRYPTO_PROVIDER.clone())
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(InsecureVerifier))
            .with_no_client_auth();

        Ok(Self {
            config: Arc::new(config),
            io_timeout,
        })
    }
}

#[async_trait]
impl Transport for TlsTransport {
    async fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Box<dyn Connection>, TransportError> {
        let addr = format!("{}:{}", host, port);

        let tcp = tokio::time::timeout(timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| TransportError::Timeout(timeout))?
            .map_err(|source| TransportError::Connect {
                addr: addr.clone(),
                source,
            })?;

        let server_name = ServerName::try_from(host.to_string())
            .map_err(|_| TransportError::ServerName(host.to_string()))?;

        let connector = TlsConnector::from(self.config.clone());
        let stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp))
            .await
            .map_err(|_| TransportError::Timeout(timeout))?
            .map_err(|source| TransportError::Handshake { addr, source })?;

        Ok(Box::new(TlsConnection {
            stream,
            io_timeout: self.io_timeout,
        }))
    }
}

struct TlsConnection {
    stream: TlsStream<TcpStream>,
    io_timeout: Duration,
}

#[async_trait]
impl Connection for TlsConnection {
    async fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        let written = tokio::time::timeout(self.io_timeout, async {
            let n = self.stream.write(buf).await?;
            self.stream.flush().await?;
            Ok::<usize, std::io::Error>(n)
        })
        .await
        .map_err(|_| TransportError::Timeout(self.io_timeout))?
        .map_err(TransportError::Send)?;

        Ok(written)
    }

    async fn recv(&mut self, max: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max];
        let n = tokio::time::timeout(self.io_timeout, self.stream.read(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout(self.io_timeout))?
            .map_err(TransportError::Receive)?;
        buf.truncate(n);
        Ok(buf)
    }

    async fn close(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}

/// Certificate verifier that accepts any certificate
#[derive(Debug)]
struct InsecureVerifier;

impl rustls::client::danger::ServerCertVerifier for InsecureVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls_pki_types::CertificateDer,
        _intermediates: &[rustls_pki_types::CertificateDer],
        _server_name: &ServerName,
        _ocsp_response: &[u8],
        _now: rustls_pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls_pki_types::CertificateDer,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls_pki_types::CertificateDer,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_constructors() {
        assert!(TlsTransport::new(Duration::from_secs(1)).is_ok());
        assert!(TlsTransport::insecure(Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_plain_listener() {
        // A listener that accepts and immediately drops cannot complete
        // a TLS handshake.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        });

        let transport = TlsTransport::insecure(Duration::from_secs(1)).unwrap();
        let result = transport
            .connect("127.0.0.1", addr.port(), Duration::from_secs(2))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_times_out_on_unroutable_port() {
        let transport = TlsTransport::insecure(Duration::from_secs(1)).unwrap();
        let err = match transport
            .connect("127.0.0.1", 1, Duration::from_millis(500))
            .await
        {
            Ok(_) => panic!("expected connect to fail"),
            Err(e) => e,
        };
        assert!(err.is_connect() || matches!(err, TransportError::Timeout(_)));
    }
}
