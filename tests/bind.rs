use envbind::{Bind, BindError, Bindings, Error, bind, from_bytes, from_str, parse_str};

#[derive(Debug, Default)]
struct ServiceConfig {
    api_port: u16,
    user: String,
    password: String,
    host: String,
    port: u16,
    db: String,
    // Not declared below, so never bound.
    cache: String,
}

envbind::impl_bind!(ServiceConfig {
    api_port,
    user,
    password,
    host,
    port,
    db = "db_name",
});

#[derive(Debug, Default, PartialEq)]
struct Tuning {
    timeout_ms: u32,
    retries: i8,
    ratio: f64,
    greeting: String,
}

impl Bind for Tuning {
    fn bindings() -> Bindings<Self> {
        Bindings::new()
            .field("timeout_ms", |dest: &mut Self| &mut dest.timeout_ms)
            .field("retries", |dest: &mut Self| &mut dest.retries)
            .field("ratio", |dest: &mut Self| &mut dest.ratio)
            .field("greeting", |dest: &mut Self| &mut dest.greeting)
    }
}

#[derive(Debug, Default)]
struct Flags {
    verbose: bool,
}

envbind::impl_bind!(Flags { verbose });

#[derive(Debug, Default)]
struct Small {
    level: u8,
}

envbind::impl_bind!(Small { level });

#[test]
fn binds_service_fixture() {
    let config: ServiceConfig =
        from_str(include_str!("fixtures/app.env")).expect("bind should succeed");

    assert_eq!(config.api_port, 8080);
    // Lowercase lookup runs first, so `user` beats the earlier `USER`.
    assert_eq!(config.user, "shadowed");
    assert_eq!(config.password, "s3cret");
    assert_eq!(config.host, "db.internal");
    assert_eq!(config.port, 5432);
    assert_eq!(config.db, "inventory");
    assert_eq!(config.cache, "");
}

#[test]
fn binds_mixed_fixture_through_builder() {
    let tuning: Tuning =
        from_bytes(include_bytes!("fixtures/mixed.env")).expect("bind should succeed");

    assert_eq!(
        tuning,
        Tuning {
            timeout_ms: 250,
            retries: -3,
            ratio: 0.015,
            greeting: "hello world".to_owned(),
        }
    );
}

#[test]
fn binds_the_documented_example() {
    #[derive(Debug, Default)]
    struct Example {
        a: i64,
        b: i64,
        d: f64,
    }
    envbind::impl_bind!(Example { a, b, d });

    let document = parse_str("A=1\nB = 2\n#c\nD=3.5\n").expect("parse should succeed");
    assert_eq!(document.get("A"), Some("1"));
    assert_eq!(document.get("B"), Some("2"));
    assert_eq!(document.get("D"), Some("3.5"));

    let mut example = Example::default();
    bind(&document, &mut example).expect("bind should succeed");
    assert_eq!((example.a, example.b, example.d), (1, 2, 3.5));
}

#[test]
fn boolean_field_is_unsupported() {
    let err = from_str::<Flags>("VERBOSE=true\n").expect_err("expected bind error");
    match err {
        Error::Bind(BindError::UnsupportedType { field, type_name }) => {
            assert_eq!(field, "verbose");
            assert_eq!(type_name, "bool");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn absent_tag_key_is_undefined() {
    let input = "api_port=1\nuser=u\npassword=p\nhost=h\nport=2\ndb=wrong\n";
    let err = from_str::<ServiceConfig>(input).expect_err("expected bind error");
    match err {
        Error::Bind(err) => {
            assert!(matches!(err, BindError::UndefinedKey { .. }));
            assert_eq!(err.field(), "db");
            assert_eq!(err.to_string(), "undefined key 'db'");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn out_of_range_values_are_invalid_numbers() {
    let err = from_str::<Small>("level=300\n").expect_err("expected bind error");
    assert!(matches!(
        err,
        Error::Bind(BindError::InvalidNumber { ref field, ref value }) if field == "level" && value == "300"
    ));

    let small: Small = from_str("LEVEL=0o17\n").expect("bind should succeed");
    assert_eq!(small.level, 15);
}

#[test]
fn underscore_separated_numbers_bind() {
    #[derive(Debug, Default)]
    struct Ports {
        port: u16,
        mask: u32,
        offset: i32,
    }
    envbind::impl_bind!(Ports { port, mask, offset });

    let ports: Ports =
        from_str("PORT=8_080\nMASK=0x_1F\nOFFSET=-1_000\n").expect("bind should succeed");
    assert_eq!((ports.port, ports.mask, ports.offset), (8080, 31, -1000));

    let err =
        from_str::<Ports>("PORT=8__080\nMASK=1\nOFFSET=1\n").expect_err("expected bind error");
    assert!(matches!(
        err,
        Error::Bind(BindError::InvalidNumber { ref field, .. }) if field == "port"
    ));
}
