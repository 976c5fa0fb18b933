use carbon_http_response::{
    ContentType, Response, ResponseError, StatusCode, TransportError, WireTransport, explain,
};
use carbon_http_test_suite::{ClosedTransport, Event, RecordingTransport};
use serde_json::json;

#[test]
fn test_send_not_found_page() {
    let mut res = Response::new();
    res.set_status_code(404)
        .unwrap()
        .set_html_body("<h3>404 Not Found</h3>")
        .set_headers([("X-Powered", "Pradeep")]);

    let mut transport = RecordingTransport::new();
    res.send(&mut transport).unwrap();

    assert_eq!(
        transport.events(),
        [
            Event::status_line(404, "Not Found"),
            Event::header("Content-Type", "text/html; charset=UTF-8"),
            Event::header("X-Powered", "Pradeep"),
            Event::body("<h3>404 Not Found</h3>"),
        ]
    );
    assert!(res.is_sent());
}

#[test]
fn test_send_custom_message_and_json() {
    let mut res = Response::new();
    res.set_headers([("X-Powered", "Pradeep"), ("X-Accept", "application/json")])
        .set_status_code(409)
        .unwrap()
        .set_status_message("Already exists")
        .set_json_body(&json!({"error": "duplicate"}))
        .unwrap();

    let mut transport = RecordingTransport::new();
    res.send(&mut transport).unwrap();

    assert_eq!(transport.events()[0], Event::status_line(409, "Already exists"));
    assert_eq!(
        transport.headers().collect::<Vec<_>>(),
        [
            ("Content-Type", "application/json; charset=UTF-8"),
            ("X-Powered", "Pradeep"),
            ("X-Accept", "application/json"),
        ]
    );
    assert_eq!(
        transport.events().last().unwrap(),
        &Event::body(r#"{"error":"duplicate"}"#)
    );
}

#[test]
fn test_send_twice_fails() {
    let mut res = Response::new();
    let mut transport = RecordingTransport::new();
    res.send(&mut transport).unwrap();
    let sent = transport.events().len();

    assert!(matches!(
        res.send(&mut transport),
        Err(ResponseError::AlreadySent)
    ));
    assert_eq!(transport.events().len(), sent);
}

#[test]
fn test_send_through_closed_transport() {
    let mut res = Response::new();
    let mut transport = ClosedTransport::default();
    assert!(matches!(
        res.send(&mut transport),
        Err(ResponseError::Transport(TransportError::Closed))
    ));
    // Nothing after the failing call is attempted
    assert_eq!(transport.calls, 1);
    assert!(matches!(
        res.send(&mut transport),
        Err(ResponseError::AlreadySent)
    ));
}

#[test]
fn test_send_over_the_wire() {
    let mut res = Response::new();
    res.call("html", json!("<h3>404 Not Found</h3>"))
        .unwrap()
        .call(
            "headers",
            json!({"X-Powered": "Pradeep", "X-Accept": "application/json"}),
        )
        .unwrap()
        .call("code", json!(404))
        .unwrap()
        .call("message", json!("You Okay??"))
        .unwrap();

    let mut transport = WireTransport::new();
    res.send(&mut transport).unwrap();
    let bytes = transport.into_bytes().unwrap();

    // Headers keep the order they were given in
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        "HTTP/1.1 404 You Okay??\r\n\
         Content-Type: text/html; charset=UTF-8\r\n\
         X-Powered: Pradeep\r\n\
         X-Accept: application/json\r\n\
         Content-Length: 22\r\n\
         \r\n\
         <h3>404 Not Found</h3>"
    );
}

#[test]
fn test_custom_content_type_replaces_default() {
    let mut res = Response::new();
    res.set_html_body("ok")
        .set_headers([("X-A", "1"), ("content-type", "text/plain"), ("X-B", "2")]);

    let mut transport = RecordingTransport::new();
    res.send(&mut transport).unwrap();
    assert_eq!(
        transport.headers().collect::<Vec<_>>(),
        [("content-type", "text/plain"), ("X-A", "1"), ("X-B", "2")]
    );

    let mut res = Response::new();
    res.set_html_body("ok")
        .set_headers([("Content-Type", "text/plain")]);
    let mut transport = WireTransport::new();
    res.send(&mut transport).unwrap();
    assert_eq!(
        std::str::from_utf8(&transport.into_bytes().unwrap()).unwrap(),
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nok"
    );
}

#[test]
fn test_wire_rejects_wrong_content_length() {
    let mut res = Response::new();
    res.set_html_body("four").set_headers([("Content-Length", "3")]);

    let mut transport = WireTransport::new();
    res.send(&mut transport).unwrap();
    assert!(matches!(
        transport.into_bytes(),
        Err(TransportError::ContentLengthMismatch {
            declared: 3,
            actual: 4
        })
    ));
}

#[test]
fn test_wire_rejects_header_injection() {
    let mut res = Response::new();
    res.set_headers([("X-Evil", "1\r\nSet-Cookie: a=b")]);

    let mut transport = WireTransport::new();
    assert!(matches!(
        res.send(&mut transport),
        Err(ResponseError::Transport(TransportError::InvalidHeader(_)))
    ));
}

#[test]
fn test_state_is_queryable_after_send() {
    let mut res = Response::new();
    res.set_status_code(418).unwrap();
    res.send(&mut RecordingTransport::new()).unwrap();

    assert_eq!(res.status_code(), StatusCode::new(418).unwrap());
    assert_eq!(res.get("message").unwrap().to_value(), json!("unknown status"));
    assert_eq!(res.content_type(), ContentType::Html);
}

#[test]
fn test_explain_is_independent_of_response() {
    let res = Response::new();
    assert_eq!(explain(Some(404)).entries()[0].name, "HTTP_NOT_FOUND");
    assert!(!explain(Some(900)).is_found());
    assert_eq!(explain(None).entries().len(), 11);
    assert_eq!(res.status_code(), StatusCode::OK);
}
