#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use todosync::api::{dispatch, ApiRequest, AuthGateway, HttpTransport, SyncError, Transport, TransportFailure};
    use todosync::libs::session::SessionStore;
    use todosync::libs::todo_store::TodoStore;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_send_captures_set_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/login"))
            .and(body_json(json!({"email": "x@x.com", "password": "secret"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc; Path=/; HttpOnly")
                    .set_body_json(json!({"email": "x@x.com"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), TIMEOUT).unwrap();
        let request = ApiRequest::put("user/login")
            .json(&json!({"email": "x@x.com", "password": "secret"}))
            .unwrap();
        let response = transport.send(request).await.unwrap();

        assert!(response.status.is_success());
        assert_eq!(response.set_cookie.as_deref(), Some("sid=abc"));
        assert_eq!(response.json::<serde_json::Value>().unwrap()["email"], "x@x.com");
    }

    #[tokio::test]
    async fn test_send_attaches_credential_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todo"))
            .and(header("cookie", "sid=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), TIMEOUT).unwrap();
        let request = ApiRequest::get("todo").credential(Some("sid=abc".to_string()));
        let response = dispatch(&transport, request, TIMEOUT).await.unwrap();

        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn test_dispatch_maps_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/identity"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/todo"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), TIMEOUT).unwrap();

        let err = dispatch(&transport, ApiRequest::get("user/identity"), TIMEOUT).await.unwrap_err();
        assert_eq!(err, SyncError::Auth { status: 403 });
        assert!(err.is_forbidden());

        let err = dispatch(&transport, ApiRequest::get("todo"), TIMEOUT).await.unwrap_err();
        assert_eq!(err, SyncError::Transport(TransportFailure::Status(502)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]").set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(200);
        let transport = HttpTransport::new(&server.uri(), timeout).unwrap();
        let err = dispatch(&transport, ApiRequest::get("todo"), timeout).await.unwrap_err();

        assert!(matches!(err, SyncError::Transport(TransportFailure::Timeout(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_failure() {
        let transport = HttpTransport::new("http://127.0.0.1:1", TIMEOUT).unwrap();
        let err = transport.send(ApiRequest::get("todo")).await.unwrap_err();

        assert!(matches!(err, SyncError::Transport(TransportFailure::Network(_))));
    }

    #[tokio::test]
    async fn test_login_then_load_list() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc; Path=/")
                    .set_body_json(json!({"email": "x@x.com"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/todo"))
            .and(header("cookie", "sid=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "1", "item": "b", "completed": true},
                {"_id": "2", "item": "a", "completed": false},
                {"_id": "3", "item": "C", "completed": false}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = Arc::new(HttpTransport::new(&server.uri(), TIMEOUT).unwrap());
        let sessions = Arc::new(SessionStore::in_memory());

        let gateway = AuthGateway::new(transport.clone(), sessions.clone());
        assert!(gateway.login("x@x.com", "secret").await);

        let mut store = TodoStore::new(transport, sessions);
        let items: Vec<String> = store.load_all().await.unwrap().iter().map(|todo| todo.item.clone()).collect();

        assert_eq!(items, vec!["a", "C", "b"]);
        assert_eq!(store.open_count(), 2);
    }

    #[tokio::test]
    async fn test_cleared_session_is_not_resent() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc; Path=/; HttpOnly")
                    .set_body_json(json!({"email": "x@x.com"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/identity"))
            .and(header("cookie", "sid=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "x@x.com"})))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/identity"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let transport = Arc::new(HttpTransport::new(&server.uri(), TIMEOUT).unwrap());
        let sessions = Arc::new(SessionStore::in_memory());
        let gateway = AuthGateway::new(transport, sessions.clone());

        assert!(gateway.login("x@x.com", "secret").await);
        assert!(gateway.check_authenticated().await);

        sessions.clear_session().unwrap();
        assert!(!gateway.check_authenticated().await);
        assert!(!sessions.has_session());
    }

    #[tokio::test]
    async fn test_login_keeps_every_set_cookie_pair() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .append_header("set-cookie", "csrf=xyz; Path=/")
                    .append_header("set-cookie", "sid=abc; Path=/; HttpOnly")
                    .set_body_json(json!({"email": "x@x.com"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/todo"))
            .and(header("cookie", "csrf=xyz; sid=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = Arc::new(HttpTransport::new(&server.uri(), TIMEOUT).unwrap());
        let sessions = Arc::new(SessionStore::in_memory());

        let gateway = AuthGateway::new(transport.clone(), sessions.clone());
        assert!(gateway.login("x@x.com", "secret").await);
        assert_eq!(
            sessions.get_session().unwrap().credential.as_deref(),
            Some("csrf=xyz; sid=abc")
        );

        let mut store = TodoStore::new(transport, sessions);
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
