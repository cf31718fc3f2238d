//! Tests for the service capabilities and the container.

#[cfg(test)]
mod service_tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::error::{Capability, Error};
    use crate::http::{HttpRequest, HttpResponse, StatusCode};
    use crate::service::{
        handler_fn, middleware_fn, Container, ContainerConfig, Handler, HandlerFuture, Lookup,
        Middleware, Next, Service,
    };

    struct Hello;

    impl Handler for Hello {
        fn handle(&self, _req: HttpRequest) -> HandlerFuture {
            Box::pin(async { Ok::<_, Error>(HttpResponse::new(StatusCode::Ok).with_body_string("hello")) })
        }
    }

    struct Tag(&'static str);

    impl Middleware for Tag {
        fn process(&self, req: HttpRequest, next: Next) -> HandlerFuture {
            let tag = self.0;
            Box::pin(async move {
                let response = next(req).await?;
                Ok::<_, Error>(response.with_header("X-Tag", tag))
            })
        }
    }

    #[tokio::test]
    async fn test_handler_fn_wraps_closure() {
        let handler = handler_fn(|req: HttpRequest| async move {
            Ok::<_, Error>(HttpResponse::new(StatusCode::Ok).with_body_string(req.path))
        });

        let response = handler.handle(HttpRequest::new("GET", "/echo")).await.unwrap();
        assert_eq!(response.body, b"/echo");
    }

    #[tokio::test]
    async fn test_middleware_forwards_to_next() {
        let middleware = middleware_fn(|req: HttpRequest, next: Next| async move {
            let response = next(req.with_header("X-Seen", "yes")).await?;
            Ok::<_, Error>(response.with_header("X-Wrapped", "1"))
        });
        let handler: Arc<dyn Handler> = Arc::new(Hello);

        let next: Next = Box::new(move |req: HttpRequest| handler.handle(req));
        let response = middleware.process(HttpRequest::new("GET", "/"), next).await.unwrap();

        assert_eq!(response.body, b"hello");
        assert_eq!(response.headers.get("X-Wrapped"), Some(&"1".to_string()));
    }

    #[test]
    fn test_service_capability() {
        assert_eq!(Service::Handler(Arc::new(Hello)).capability(), Some(Capability::Handler));
        assert_eq!(
            Service::Middleware(Arc::new(Tag("a"))).capability(),
            Some(Capability::Middleware)
        );

        let value = Service::Value(Arc::new(42u32));
        assert_eq!(value.capability(), None);
        assert_eq!(value.downcast_value::<u32>().as_deref(), Some(&42));
        assert!(value.downcast_value::<String>().is_none());
        assert!(value.clone().into_handler().is_none());
        assert!(value.into_middleware().is_none());
    }

    #[test]
    fn test_container_register_and_get() {
        let container = Container::new();
        container.register_handler("home", Hello).unwrap();
        container.register_middleware("tag", Tag("a")).unwrap();
        container.register_value("answer", 42u32).unwrap();

        assert_eq!(container.len(), 3);
        assert_eq!(container.keys(), vec!["answer", "home", "tag"]);
        assert!(container.has("home"));
        assert!(!container.has("missing"));

        assert!(matches!(container.get("home"), Ok(Service::Handler(_))));
        assert!(matches!(container.get("tag"), Ok(Service::Middleware(_))));
        assert!(matches!(container.get("answer"), Ok(Service::Value(_))));
    }

    #[test]
    fn test_container_not_found() {
        let container = Container::new();
        let result = container.get("nope");
        assert!(matches!(result, Err(Error::NotFound(ref key)) if key == "nope"));
    }

    #[test]
    fn test_container_clone_shares_storage() {
        let container = Container::new();
        let other = container.clone();
        other.register_handler("home", Hello).unwrap();
        assert!(container.has("home"));

        assert!(container.remove("home").unwrap());
        assert!(!other.has("home"));
        assert!(other.is_empty());
    }

    #[test]
    fn test_container_overrides_disabled() {
        let container = Container::with_config(ContainerConfig {
            allow_overrides: false,
        });
        container.register_value("answer", 1u32).unwrap();

        let result = container.register_value("answer", 2u32);
        assert!(matches!(result, Err(Error::AlreadyRegistered(ref key)) if key == "answer"));

        let value = container.get("answer").unwrap().downcast_value::<u32>().unwrap();
        assert_eq!(*value, 1);
    }

    #[test]
    fn test_container_overrides_allowed_by_default() {
        let container = Container::new();
        assert!(container.config().allow_overrides);
        container.register_value("answer", 1u32).unwrap();
        container.register_value("answer", 2u32).unwrap();

        let value = container.get("answer").unwrap().downcast_value::<u32>().unwrap();
        assert_eq!(*value, 2);
    }

    #[test]
    fn test_factory_runs_on_every_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let container = Container::new();
        container
            .register_factory("home", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Service::Handler(Arc::new(Hello)))
            })
            .unwrap();

        container.get("home").unwrap();
        container.get("home").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_factory_can_look_up_dependencies() {
        let container = Container::new();
        container.register_value("greeting", "hi".to_string()).unwrap();
        container
            .register_factory("home", |c| {
                let greeting = c
                    .get("greeting")?
                    .downcast_value::<String>()
                    .ok_or_else(|| Error::Lookup {
                        key: "greeting".to_string(),
                        reason: "not a string".to_string(),
                    })?;
                Ok(Service::Handler(handler_fn(move |_req| {
                    let greeting = greeting.clone();
                    async move { Ok::<_, Error>(HttpResponse::new(StatusCode::Ok).with_body_string(greeting.as_str())) }
                })))
            })
            .unwrap();

        assert!(matches!(container.get("home"), Ok(Service::Handler(_))));
    }

    #[test]
    fn test_factory_error_is_propagated() {
        let container = Container::new();
        container
            .register_factory("broken", |c| c.get("missing-dependency"))
            .unwrap();

        let result = container.get("broken");
        assert!(matches!(result, Err(Error::NotFound(ref key)) if key == "missing-dependency"));
    }

    #[test]
    fn test_circular_factories_are_reported() {
        let container = Container::new();
        container.register_factory("a", |c| c.get("b")).unwrap();
        container.register_factory("b", |c| c.get("a")).unwrap();

        match container.get("a") {
            Err(Error::Lookup { key, reason }) => {
                assert_eq!(key, "a");
                assert!(reason.contains("a -> b -> a"), "unexpected reason: {reason}");
            }
            other => panic!("expected a lookup error, got {other:?}"),
        }

        // The in-progress stack is unwound after the failure.
        container.register_factory("b", |_| Ok(Service::Handler(Arc::new(Hello)))).unwrap();
        assert!(container.get("a").is_ok());
    }

    #[test]
    fn test_hash_map_lookup() {
        let mut services: HashMap<String, Service> = HashMap::new();
        services.insert("home".to_string(), Service::Handler(Arc::new(Hello)));

        assert!(services.has("home"));
        assert!(Lookup::get(&services, "home").is_ok());
        assert!(matches!(Lookup::get(&services, "x"), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_handler_failure_surfaces_error() {
        let handler = handler_fn(|_req: HttpRequest| async {
            Err::<HttpResponse, _>(Error::Handler("database unavailable".to_string()))
        });

        let result = handler.handle(HttpRequest::new("GET", "/")).await;
        assert!(matches!(result, Err(Error::Handler(ref msg)) if msg == "database unavailable"));
    }

    #[test]
    fn test_error_key() {
        assert_eq!(Error::NotFound("a".to_string()).key(), Some("a"));
        let mismatch = Error::TypeMismatch {
            expected: Capability::Middleware,
            key: "b".to_string(),
        };
        assert_eq!(mismatch.key(), Some("b"));
        assert_eq!(mismatch.to_string(), "Service b is not a middleware");
        assert_eq!(Error::Handler("x".to_string()).key(), None);
    }
}
