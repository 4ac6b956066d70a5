/*!
The three stateful protocol roles: [`verifier::VerifierGenerator`],
[`client::ClientSession`], [`server::ServerSession`].
*/
pub mod client;
pub mod server;
pub mod verifier;
