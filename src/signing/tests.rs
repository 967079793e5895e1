//! Tests for the authenticated URL builder

use super::*;
use crate::auth::StaticCredential;
use crate::error::Error;
use crate::types::Photo;
use std::sync::Arc;

fn fixed_builder(config: UrlBuilderConfig) -> AuthenticatedUrlBuilder {
    AuthenticatedUrlBuilder::with_cache_buster(config, Arc::new(FixedCacheBuster("1700".into())))
        .unwrap()
}

#[test]
fn test_relative_path_under_api_base() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com/v1"));
    let url = builder.build("/media/42/thumb", Some("abc")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/v1/media/42/thumb?token=abc&_ts=1700"
    );
}

#[test]
fn test_relative_path_with_trailing_slash_base() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com/"));
    let url = builder.build("media/1", Some("t")).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/media/1?token=t&_ts=1700");
}

#[test]
fn test_dev_proxy_resolves_against_document_origin() {
    let builder = fixed_builder(UrlBuilderConfig::with_dev_proxy("http://localhost:5173"));
    let url = builder.build("/api/media/7", Some("t")).unwrap();
    assert_eq!(url.as_str(), "http://localhost:5173/api/media/7?token=t&_ts=1700");
}

#[test]
fn test_dev_proxy_rejects_scheme_relative_paths() {
    let builder = fixed_builder(UrlBuilderConfig::with_dev_proxy("http://localhost:5173"));

    for path in ["//evil.example.net/x.jpg", "\\\\evil.example.net/x.jpg"] {
        let err = builder.build(path, Some("SECRET")).unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfiguration { .. }),
            "{path}: {err:?}"
        );
    }
    assert!(builder.resolve("//evil.example.net/x.jpg").is_err());
}

#[test]
fn test_api_base_keeps_host_for_slash_prefixed_paths() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com"));
    let url = builder.build("//evil.example.net/x.jpg", Some("t")).unwrap();
    assert_eq!(url.host_str(), Some("api.example.com"));
}

#[test]
fn test_absolute_url_used_as_is() {
    let builder = fixed_builder(UrlBuilderConfig::default());
    let url = builder
        .build("https://cdn.example.com/p/1.jpg?size=large", Some("t"))
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://cdn.example.com/p/1.jpg?size=large&token=t&_ts=1700"
    );
}

#[test]
fn test_existing_token_and_cache_bust_are_overwritten() {
    let builder = fixed_builder(UrlBuilderConfig::default());
    let url = builder
        .build(
            "https://cdn.example.com/p/1.jpg?token=old&a=1&_ts=5",
            Some("fresh"),
        )
        .unwrap();

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "1".to_string()),
            ("token".to_string(), "fresh".to_string()),
            ("_ts".to_string(), "1700".to_string()),
        ]
    );
}

#[test]
fn test_untouched_parameters_keep_their_encoding() {
    let builder = fixed_builder(UrlBuilderConfig::default());
    let url = builder
        .build(
            "https://cdn.example.com/p/1.jpg?caption=a%20b&token=old&tag=x+y",
            Some("fresh"),
        )
        .unwrap();
    assert_eq!(
        url.query(),
        Some("caption=a%20b&tag=x+y&token=fresh&_ts=1700")
    );
}

#[test]
fn test_token_is_query_encoded() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com"));
    let url = builder.build("/m", Some("a b&c")).unwrap();
    assert!(url.as_str().contains("token=a+b%26c"));
}

#[test]
fn test_missing_base_url() {
    let builder = fixed_builder(UrlBuilderConfig::default());
    let err = builder.build("/media/1", Some("t")).unwrap_err();
    assert!(matches!(err, Error::MissingBaseUrl { .. }));
}

#[test]
fn test_missing_credential_is_invalid_configuration() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com"));
    assert!(matches!(
        builder.build("/m", None),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        builder.build("/m", Some("")),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_optional_credential_only_busts_cache() {
    let config = UrlBuilderConfig {
        require_credential: false,
        ..UrlBuilderConfig::with_api_base("https://api.example.com")
    };
    let builder = fixed_builder(config);
    let url = builder.build("/public/1", None).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/public/1?_ts=1700");
}

#[test]
fn test_invalid_parameter_names_rejected() {
    let same = UrlBuilderConfig {
        cache_bust_param: "token".into(),
        ..UrlBuilderConfig::default()
    };
    assert!(matches!(
        AuthenticatedUrlBuilder::new(same),
        Err(Error::InvalidConfiguration { .. })
    ));

    let empty = UrlBuilderConfig {
        token_param: String::new(),
        ..UrlBuilderConfig::default()
    };
    assert!(AuthenticatedUrlBuilder::new(empty).is_err());
}

#[test]
fn test_unparseable_base_rejected() {
    let result = AuthenticatedUrlBuilder::new(UrlBuilderConfig::with_api_base("not a url"));
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_counter_cache_buster_changes_every_build() {
    let builder = AuthenticatedUrlBuilder::with_cache_buster(
        UrlBuilderConfig::with_api_base("https://api.example.com"),
        Arc::new(CounterCacheBuster::starting_at(10)),
    )
    .unwrap();

    let first = builder.build("/m", Some("t")).unwrap();
    let second = builder.build("/m", Some("t")).unwrap();
    assert!(first.as_str().ends_with("_ts=10"));
    assert!(second.as_str().ends_with("_ts=11"));
}

#[test]
fn test_monotonic_clock_strictly_increases() {
    let buster = MonotonicClockBuster::new();
    let values: Vec<i64> = (0..50)
        .map(|_| buster.next_value().parse().unwrap())
        .collect();
    assert!(values.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_signed_photo_urls() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com"));
    let photo = Photo::new("9", "cat.jpg", "/media/9/thumb", "/media/9");

    let thumb = builder.signed_thumbnail(&photo, Some("t")).unwrap();
    let full = builder.signed_full(&photo, Some("t")).unwrap();
    assert_eq!(thumb.path(), "/media/9/thumb");
    assert_eq!(full.path(), "/media/9");
}

#[tokio::test]
async fn test_build_with_credential_source() {
    let builder = fixed_builder(UrlBuilderConfig::with_api_base("https://api.example.com"));

    let url = builder
        .build_with("/m", &StaticCredential::new("live"))
        .await
        .unwrap();
    assert!(url.as_str().contains("token=live"));

    let err = builder
        .build_with("/m", &StaticCredential::none())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
}
