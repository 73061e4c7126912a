//! TLS configuration and certificate loading.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use tonic::transport::Certificate;
use x509_parser::prelude::parse_x509_certificate;

use crate::error::{ValidationError, ValidationResult};

/// A node certificate read once at client construction.
#[derive(Debug, Clone)]
pub struct NodeCertificate {
    pem: Vec<u8>,
    common_name: String,
}

impl NodeCertificate {
    /// Read a PEM certificate and pull its subject common name.
    pub fn load(path: &Path) -> ValidationResult<Self> {
        let pem = fs::read(path).map_err(|e| invalid(path, e.to_string()))?;
        Self::from_pem(pem).map_err(|reason| invalid(path, reason))
    }

    pub fn from_pem(pem: Vec<u8>) -> Result<Self, String> {
        let common_name = extract_common_name(&pem)?;
        Ok(Self { pem, common_name })
    }

    /// Subject common name; the node's identity when no explicit node id is given.
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Trust anchor for the TLS handshake.
    pub fn to_tonic(&self) -> Certificate {
        Certificate::from_pem(&self.pem)
    }
}

fn invalid(path: &Path, reason: String) -> ValidationError {
    ValidationError::InvalidCertificate {
        path: path.display().to_string(),
        reason,
    }
}

/// Common name of the first certificate in a PEM bundle.
pub fn extract_common_name(pem: &[u8]) -> Result<String, String> {
    let mut reader = BufReader::new(pem);
    let der = rustls_pemfile::certs(&mut reader)
        .next()
        .ok_or_else(|| "no certificate found in PEM input".to_string())?
        .map_err(|e| e.to_string())?;

    let (_, certificate) = parse_x509_certificate(der.as_ref()).map_err(|e| e.to_string())?;
    let common_name = certificate
        .subject()
        .iter_common_name()
        .next()
        .ok_or_else(|| "certificate subject has no common name".to_string())?
        .as_str()
        .map_err(|e| e.to_string())?;
    Ok(common_name.to_string())
}
