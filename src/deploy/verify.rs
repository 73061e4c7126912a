//! Deploy hashing and integrity checks.

use prost::Message;

use crate::crypto::{blake2b_hash, verify, HASH_LENGTH};
use crate::error::{ValidationError, ValidationResult};
use crate::proto::{Body, Deploy, Header};

/// Hash of the serialized body.
pub fn hash_body(body: &Body) -> [u8; HASH_LENGTH] {
    blake2b_hash(&body.encode_to_vec())
}

/// Hash of the serialized header; this is the deploy hash.
pub fn hash_header(header: &Header) -> [u8; HASH_LENGTH] {
    blake2b_hash(&header.encode_to_vec())
}

/// Recompute both hashes and reject a deploy whose content no longer matches.
pub fn verify_hashes(deploy: &Deploy) -> ValidationResult<()> {
    let header = deploy
        .header
        .as_ref()
        .ok_or(ValidationError::IncompleteDeploy("header"))?;
    let body = deploy
        .body
        .as_ref()
        .ok_or(ValidationError::IncompleteDeploy("body"))?;

    if header.body_hash != hash_body(body) {
        return Err(ValidationError::BodyHashMismatch);
    }
    if deploy.deploy_hash != hash_header(header) {
        return Err(ValidationError::DeployHashMismatch);
    }
    Ok(())
}

/// Indexes of approvals whose signature does not verify over the deploy hash.
pub fn verify_approvals(deploy: &Deploy) -> Vec<usize> {
    deploy
        .approvals
        .iter()
        .enumerate()
        .filter(|(_, approval)| {
            !approval.signature.as_ref().is_some_and(|signature| {
                verify(&approval.approver_public_key, &deploy.deploy_hash, signature)
            })
        })
        .map(|(index, _)| index)
        .collect()
}
