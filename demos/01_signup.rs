use srp6a::{SessionConfig, VerifierGenerator};

fn main() {
    // this is what a user would enter in a form / terminal
    let new_username = "Bob";
    let user_password = "secret-password";

    let config = SessionConfig::default();
    let (salt, verifier) =
        VerifierGenerator::new(config).generate_with_salt(new_username, user_password, 16);
    assert_eq!(salt.len(), 16);
    assert_eq!(verifier.len(), config.group.group().byte_len());

    println!("Simulating a server and signup with user {new_username}");
    println!(" - User's username   [I] = {new_username:?}");
    println!(" - Salt              [s] = {salt:?}");
    println!(" - Password verifier [v] = {verifier:?}");
    println!("This is a one time action, normally this data is stored in a user database");
    println!();
    println!("Next authentication process `cargo run --example 02_authentication`");
}
