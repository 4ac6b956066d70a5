use std::time::{Duration, Instant};

use srp6a::{ClientSession, ServerSession, SessionConfig, VerifierGenerator};

fn main() {
    let username = "Bob";
    let password = "secret-password";
    let config = SessionConfig::default();
    // new user: sent to the server and stored there
    let (salt, verifier) = VerifierGenerator::new(config).generate_with_salt(username, password, 16);

    let mut durations = Duration::default();
    #[cfg(debug_assertions)]
    const NLOOPS: u32 = 10;
    #[cfg(not(debug_assertions))]
    const NLOOPS: u32 = 100;

    for _ in 0..NLOOPS {
        let start = Instant::now();

        let mut client = ClientSession::new(config);
        let mut server = ServerSession::new(config);

        let a_pub = client.start_authentication().unwrap();
        let b_pub = server.start_authentication(username, &salt, &verifier).unwrap();

        let (m1, _) = client
            .process_challenge(username, password, &salt, &b_pub, false)
            .unwrap()
            .expect("safety checks pass");
        let (ok, m2) = server.verify_session(&a_pub, &m1).unwrap();
        let m2 = m2.expect("server accepted the client's proof");
        assert!(client.verify_session(&m2).unwrap());

        let duration = start.elapsed();
        durations = durations.checked_add(duration).unwrap();

        assert!(ok);
        assert_eq!(client.session_key(), server.session_key());
    }

    println!("Time elapsed in auth is: {:?}", durations / NLOOPS);
}
