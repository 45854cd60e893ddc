/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Token payloads and the stored session record
pub mod auth;
/// Response envelope and auth outcome
pub mod envelope;
/// HTTP transport and query encoding
pub mod http;
/// Item keys and selections
pub mod items;
