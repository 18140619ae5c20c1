//! HTTP surface for beamdrop.
//!
//! Request flow: `POST /upload` spools the file, signs a claim over its
//! opaque blob id, builds an absolute download URL from the LAN address, and
//! returns the URL plus a QR rendering of it. `GET /download/{token}`
//! verifies the token and streams the blob back under its original name.

pub mod api;
pub mod config;
pub mod error;
pub mod netaddr;
pub mod qr;
