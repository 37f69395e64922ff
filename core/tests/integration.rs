//! Full FAQ lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `FaqStore` over
//! real HTTP with `UreqTransport`. Validates that request building,
//! response parsing and state updates agree with the actual server.

use faq_core::{validate, ApiError, FaqClient, FaqForm, FaqRecord, FaqStore, StatusFilter, StoreError, Transport, UreqTransport};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn faq_lifecycle() {
    let base_url = start_server();
    let mut store = FaqStore::new(FaqClient::new(&base_url), UreqTransport::default());

    // Step 1: list — should be empty.
    store.list_page(1, 20, StatusFilter::Total).unwrap();
    assert!(store.state().items.is_empty(), "expected empty list");
    assert_eq!(store.state().total_pages, 1);

    // Step 2: validate, then create two FAQs.
    let first = FaqRecord::new("How do I reset my password?", "Use the forgot password link.");
    assert!(validate(&FaqForm::from(&first)).is_empty());
    let first = store.create(&first).unwrap();
    let first_id = first.id.clone().expect("server assigns an id");
    assert!(first.status);

    let second = store
        .create(&FaqRecord::new("Can I export my data?", "Yes, from the settings page."))
        .unwrap();
    let second_id = second.id.clone().unwrap();
    assert_eq!(store.state().items.len(), 2);

    // Step 3: duplicate create is refused before reaching the create endpoint.
    let err = store
        .create(&FaqRecord::new("how do i reset my password?", "Another answer text."))
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate));
    assert_eq!(store.state().items.len(), 2);

    // Step 4: update may keep its own question.
    let edited = FaqRecord {
        answer: "Click 'Forgot password' on the sign-in page.".to_string(),
        ..first.clone()
    };
    store.update(&first_id, &edited).unwrap();
    assert_eq!(
        store.state().find(&first_id).unwrap().answer,
        "Click 'Forgot password' on the sign-in page."
    );

    // Step 5: update onto another record's question is refused.
    let clash = FaqRecord {
        question: "Can I export my data?".to_string(),
        ..edited.clone()
    };
    assert!(matches!(
        store.update(&first_id, &clash).unwrap_err(),
        StoreError::Duplicate
    ));

    // Step 6: toggle — local status follows the server despite the
    // previous-status response.
    assert!(!store.toggle_status(&second_id).unwrap());
    let fetched = store.get_by_id(&second_id).unwrap();
    assert!(!fetched.status);
    assert!(!store.state().find(&second_id).unwrap().status);

    // Step 7: filtered list with dataset-wide counts.
    store.list_page(1, 20, StatusFilter::Inactive).unwrap();
    let state = store.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id.as_deref(), Some(second_id.as_str()));
    assert_eq!(state.counts.total, 2);
    assert_eq!(state.counts.active, 1);
    assert_eq!(state.counts.inactive, 1);

    // Step 8: pagination.
    store.list_page(2, 1, StatusFilter::Total).unwrap();
    assert_eq!(store.state().total_pages, 2);
    assert_eq!(store.state().current_page, 2);
    assert_eq!(store.state().items[0].id.as_deref(), Some(second_id.as_str()));

    // Step 9: delete.
    store.delete(&second_id).unwrap();
    assert!(store.state().find(&second_id).is_none());
    assert!(store.state().last_error.is_none());

    // Step 10: get after delete — None, with the server's message.
    assert!(store.get_by_id(&second_id).is_none());
    assert_eq!(store.state().last_error.as_deref(), Some("FAQ not found"));

    // Step 11: delete again — NotFound.
    let err = store.delete(&second_id).unwrap_err();
    assert!(err.is_not_found());

    // Step 12: list — one left.
    store.list_page(1, 20, StatusFilter::Total).unwrap();
    assert_eq!(store.state().items.len(), 1);
    assert_eq!(store.state().counts.total, 1);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = FaqClient::new(&format!("http://{addr}"));
    let err = UreqTransport::default()
        .execute(&client.build_list_page(1, 20, StatusFilter::Total))
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
