//! Example: Syncing whole-file saves from two machines.
//!
//! A sync agent usually cannot see keystrokes, only "the file is now X".
//! `diff` turns two file states into an operation sequence, and from there
//! the ordinary client/server protocol takes over.

use std::cell::RefCell;
use std::rc::Rc;

use ot_kit::prelude::*;

fn spawn_machine(server: &Server) -> (Client, Rc<RefCell<Vec<(usize, Ops)>>>) {
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
    println!("=== File Sync Example ===\n");

    let original = "# Notes\n\n- buy milk\n";
    let mut server = Server::new(Doc::from(original));
    let (mut laptop, laptop_out) = spawn_machine(&server);
    let (mut desktop, desktop_out) = spawn_machine(&server);

    // The laptop saves a new line at the bottom
    let saved = "# Notes\n\n- buy milk\n- call mom\n";
    let edit = diff(&text(laptop.doc()), saved);
    println!("Laptop saved; diff produced {edit:?}");
    laptop.apply(edit).unwrap();

    // The desktop saved concurrently, rewording the first item
    let saved = "# Notes\n\n- buy oat milk\n";
    let edit = diff(&text(desktop.doc()), saved);
    println!("Desktop saved; diff produced {edit:?}");
    desktop.apply(edit).unwrap();

    // The laptop's save reaches the server first
    let (rev, ops) = laptop_out.borrow_mut().remove(0);
    let (broadcast, _) = server.recv(rev, ops).unwrap();
    laptop.ack().unwrap();
    desktop.recv(broadcast).unwrap();

    // The desktop's save is stale; the server rebases it past the laptop's
    let (rev, ops) = desktop_out.borrow_mut().remove(0);
    let (broadcast, _) = server.recv(rev, ops).unwrap();
    println!("\nDesktop's save rebased to {broadcast:?}");
    desktop.ack().unwrap();
    laptop.recv(broadcast).unwrap();

    println!("\nCanonical file after sync:\n{}", text(server.doc()));
    assert_eq!(laptop.doc(), server.doc());
    assert_eq!(desktop.doc(), server.doc());
    println!(
        "Both machines converged; server is at revision {} with {} history entries",
        server.rev(),
        server.history().len()
    );
}
