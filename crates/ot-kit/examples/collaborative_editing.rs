//! Example: Two editors typing into the same document at once.

use std::cell::RefCell;
use std::rc::Rc;

use ot_kit::prelude::*;

/// Joins a client to the session, capturing everything its send callback
/// submits so the example can relay it to the server by hand.
fn spawn_editor(server: &Server) -> (Client, Rc<RefCell<Vec<(usize, Ops)>>>) {
    let outbox = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outbox);
    let client = Client::from_snapshot(
        server.snapshot(),
        Box::new(move |rev, ops: &Ops| sink.borrow_mut().push((rev, ops.clone()))),
    )
    .unwrap();
    (client, outbox)
}

fn text(doc: &Doc) -> String {
    String::from_utf8_lossy(doc.as_bytes()).into_owned()
}

fn main() {
    println!("=== Collaborative Editing Example ===\n");

    let mut server = Server::new(Doc::from("hello world"));
    let (mut alice, alice_out) = spawn_editor(&server);
    let (mut bob, bob_out) = spawn_editor(&server);

    // Both editors type before either hears from the server
    alice
        .apply(Ops::new().retain(5).insert(" brave").retain(6))
        .unwrap();
    bob.apply(Ops::new().retain(11).insert("!")).unwrap();

    println!("Alice sees: {:?}", text(alice.doc()));
    println!("Bob sees:   {:?}", text(bob.doc()));

    // Alice's edit reaches the server first and applies as-is
    let (rev, ops) = alice_out.borrow_mut().remove(0);
    let (broadcast, _) = server.recv(rev, ops).unwrap();
    alice.ack().unwrap();
    bob.recv(broadcast).unwrap();

    // Bob's edit was built against revision 0, so the server rebases it
    let (rev, ops) = bob_out.borrow_mut().remove(0);
    println!("\nBob submitted {ops:?} against revision {rev}");
    let (broadcast, _) = server.recv(rev, ops).unwrap();
    println!("Server rebased it to {broadcast:?}");
    bob.ack().unwrap();
    alice.recv(broadcast).unwrap();

    println!("\nServer holds: {:?}", text(server.doc()));
    println!("Alice sees:   {:?}", text(alice.doc()));
    println!("Bob sees:     {:?}", text(bob.doc()));

    assert_eq!(alice.doc(), server.doc());
    assert_eq!(bob.doc(), server.doc());
    println!("\nAll replicas converged at revision {}", server.rev());
}
