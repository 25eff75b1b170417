//! Behavioral matrix for `try_clean`.

use uc_core::{try_clean, Config, SiteRule, TrackingParamGroup};

/// Minimal config with one tracking-param group.
fn simple_config(params: &[&str]) -> Config {
    Config {
        tracking_params: vec![TrackingParamGroup {
            comment: String::new(),
            params: strings(params),
        }],
        ..Config::default()
    }
}

fn with_rules(params: &[&str], rules: Vec<SiteRule>) -> Config {
    Config {
        site_rules: rules,
        ..simple_config(params)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Clean `input`, check the output, then check the output is a fixed point.
fn assert_cleans(config: &Config, input: &str, expected: &str) {
    let cleaned = try_clean(input, config);
    assert_eq!(cleaned.as_deref(), Some(expected), "cleaning {input}");
    assert_eq!(try_clean(expected, config), None, "re-cleaning {expected}");
}

// -----------------------------------------------------------------------------
// Not applicable
// -----------------------------------------------------------------------------

#[test]
fn returns_none_when_not_a_url() {
    let config = simple_config(&["utm_source"]);
    for input in ["hello world", "not a url at all", "", "   ", "example.com?utm_source=x", "/path?utm_source=x"] {
        assert_eq!(try_clean(input, &config), None, "{input}");
    }
}

#[test]
fn returns_none_for_non_http_schemes() {
    let config = simple_config(&["utm_source"]);
    for input in [
        "ftp://example.com/file?utm_source=x",
        "mailto:user@example.com?utm_source=x",
        "file:///tmp/a?utm_source=x",
        "ws://example.com/?utm_source=x",
    ] {
        assert_eq!(try_clean(input, &config), None, "{input}");
    }
}

#[test]
fn returns_none_when_nothing_to_strip() {
    let config = simple_config(&["utm_source"]);
    for input in [
        "https://example.com?foo=bar",
        "https://example.com/page",
        "https://example.com",
        "https://example.com/?",
        "https://example.com/page#utm_source=x",
    ] {
        assert_eq!(try_clean(input, &config), None, "{input}");
    }
}

#[test]
fn empty_configuration_is_a_noop() {
    let config = with_rules(&[], vec![SiteRule::default()]);
    assert_eq!(try_clean("https://example.com/a?utm_source=x#f", &config), None);
}

// -----------------------------------------------------------------------------
// Rule resolution
// -----------------------------------------------------------------------------

#[test]
fn disabled_rule_returns_none() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            enabled: false,
            ..SiteRule::for_suffixes(["example.com"])
        }],
    );
    assert_eq!(try_clean("https://example.com?utm_source=x", &config), None);
    assert_eq!(try_clean("https://sub.example.com/a?utm_source=x", &config), None);
}

#[test]
fn first_matching_rule_wins_over_more_specific() {
    let config = with_rules(
        &[],
        vec![
            SiteRule {
                additional_params: strings(&["a"]),
                ..SiteRule::for_suffixes(["example.com"])
            },
            SiteRule {
                additional_params: strings(&["b"]),
                ..SiteRule::for_suffixes(["shop.example.com"])
            },
        ],
    );
    assert_cleans(&config, "https://shop.example.com/?a=1&b=2", "https://shop.example.com/?b=2");
}

#[test]
fn suffix_match_is_plain_trailing_substring() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_fragment: true,
            ..SiteRule::for_suffixes(["EXAMPLE.com"])
        }],
    );
    assert_cleans(&config, "https://evilexample.com/#x", "https://evilexample.com/");
}

#[test]
fn unicode_suffix_matches_internationalized_host() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_fragment: true,
            ..SiteRule::for_suffixes(["bücher.de"])
        }],
    );
    assert_cleans(&config, "https://www.bücher.de/a#frag", "https://www.bücher.de/a");
    assert_cleans(&config, "https://www.xn--bcher-kva.de/a#frag", "https://www.xn--bcher-kva.de/a");
    assert_eq!(try_clean("https://www.buecher.de/a#frag", &config), None);
}

#[test]
fn punycode_suffix_matches_unicode_host() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_fragment: true,
            ..SiteRule::for_suffixes(["xn--bcher-kva.de"])
        }],
    );
    assert_cleans(&config, "https://www.Bücher.de/a#frag", "https://www.Bücher.de/a");
}

// -----------------------------------------------------------------------------
// Query
// -----------------------------------------------------------------------------

#[test]
fn strips_global_tracking_params() {
    let config = simple_config(&["utm_source", "fbclid"]);
    assert_cleans(&config, "https://example.com?utm_source=x", "https://example.com");
    assert_cleans(&config, "https://example.com?v=abc&utm_source=x", "https://example.com?v=abc");
    assert_cleans(&config, "https://example.com?utm_source=x&fbclid=y", "https://example.com");
}

#[test]
fn strips_across_groups_case_insensitively() {
    let config = Config {
        tracking_params: vec![
            TrackingParamGroup {
                comment: "utm".into(),
                params: strings(&["utm_source"]),
            },
            TrackingParamGroup {
                comment: "facebook".into(),
                params: strings(&["FBCLID"]),
            },
        ],
        ..Config::default()
    };
    assert_cleans(
        &config,
        "https://example.com/a?UTM_SOURCE=x&id=7&fbclid=y",
        "https://example.com/a?id=7",
    );
}

#[test]
fn compares_decoded_keys_but_keeps_raw_pairs() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(
        &config,
        "https://example.com/s?q=caf%C3%A9+au+lait&utm%5Fsource=x&t=%2F",
        "https://example.com/s?q=caf%C3%A9+au+lait&t=%2F",
    );
}

#[test]
fn malformed_key_encoding_does_not_fail() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(
        &config,
        "https://example.com/?%FF%FE=1&utm_source=x",
        "https://example.com/?%FF%FE=1",
    );
}

#[test]
fn strips_additional_params() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            additional_params: strings(&["ref_id"]),
            ..SiteRule::for_suffixes(["shop.com"])
        }],
    );
    assert_cleans(&config, "https://shop.com/item?ref_id=abc", "https://shop.com/item");
}

#[test]
fn keeps_excluded_params() {
    let config = with_rules(
        &["utm_source", "pp"],
        vec![SiteRule {
            excluded_params: strings(&["pp"]),
            ..SiteRule::for_suffixes(["youtube.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://youtube.com/watch?utm_source=x&pp=keep",
        "https://youtube.com/watch?pp=keep",
    );
    assert_cleans(&config, "https://example.com/?pp=x&a=1", "https://example.com/?a=1");
}

#[test]
fn strip_all_params_removes_everything() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_all_params: true,
            ..SiteRule::for_suffixes(["amazon.com"])
        }],
    );
    assert_cleans(&config, "https://amazon.com/dp/B123?tag=abc&ref=sr", "https://amazon.com/dp/B123");
}

#[test]
fn strip_all_params_keeps_excluded_params() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_all_params: true,
            excluded_params: strings(&["variant"]),
            ..SiteRule::for_suffixes(["amazon.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://amazon.com/dp/B123?tag=abc&variant=blue",
        "https://amazon.com/dp/B123?variant=blue",
    );
}

#[test]
fn unchanged_query_is_reused_verbatim() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            strip_fragment: true,
            ..SiteRule::for_suffixes(["example.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://example.com/a?b=%7e&&c=d e#frag",
        "https://example.com/a?b=%7e&&c=d e",
    );
}

// -----------------------------------------------------------------------------
// Path
// -----------------------------------------------------------------------------

#[test]
fn strip_path_segments_removes_matching_segments() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            strip_path_segments: strings(&["ref="]),
            ..SiteRule::for_suffixes(["amazon.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://amazon.com/dp/B123/ref=sr_1_8?color=red",
        "https://amazon.com/dp/B123?color=red",
    );
    assert_cleans(&config, "https://amazon.com/dp/B123/ref=sr_1_8", "https://amazon.com/dp/B123");
}

#[test]
fn combined_path_and_query_cleaning() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_all_params: true,
            strip_path_segments: strings(&["ref="]),
            ..SiteRule::for_suffixes(["amazon.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://amazon.com/dp/B123/ref=sr_1_8?tag=abc&camp=123",
        "https://amazon.com/dp/B123",
    );
}

#[test]
fn keep_path_from_uses_earliest_anchor() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            keep_path_from: strings(&["dp", "gp"]),
            ..SiteRule::for_suffixes(["amazon.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://www.amazon.com/slug/gp/foo/dp/B123",
        "https://www.amazon.com/gp/foo/dp/B123",
    );
    assert_eq!(try_clean("https://www.amazon.com/dp/B123", &config), None);
}

#[test]
fn keep_path_from_with_prefix_and_strip_all() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            keep_path_from: strings(&["dp"]),
            strip_path_segments: strings(&["ref="]),
            strip_all_params: true,
            ..SiteRule::for_suffixes(["amazon.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://www.amazon.com/Enchanti-Removable-Magnetic/dp/B0DPKB2ZMF/ref=sr_1_8?tag=abc&camp=123",
        "https://www.amazon.com/dp/B0DPKB2ZMF",
    );
}

#[test]
fn strip_slugs_only_touches_digit_hyphen_segments() {
    let config = with_rules(
        &[],
        vec![SiteRule {
            strip_slugs: true,
            ..SiteRule::for_suffixes(["example.com"])
        }],
    );
    assert_eq!(try_clean("https://example.com/items/abc-123", &config), None);
    assert_cleans(
        &config,
        "https://example.com/en/models/2409726-travel-power-adapter",
        "https://example.com/en/models/2409726",
    );
    assert_cleans(
        &config,
        "https://example.com/en/models/2409726-travel-power-adapter/?color=red#specs",
        "https://example.com/en/models/2409726/?color=red#specs",
    );
}

#[test]
fn path_rules_need_a_site_rule() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            strip_slugs: true,
            ..SiteRule::for_suffixes(["example.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://other.org/123-slug?utm_source=x",
        "https://other.org/123-slug",
    );
}

// -----------------------------------------------------------------------------
// Fragment
// -----------------------------------------------------------------------------

#[test]
fn preserves_fragment_without_rule() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(
        &config,
        "https://example.com/page?utm_source=x#section",
        "https://example.com/page#section",
    );
}

#[test]
fn strips_fragment_with_rule() {
    let config = with_rules(
        &["utm_source"],
        vec![SiteRule {
            strip_fragment: true,
            ..SiteRule::for_suffixes(["example.com"])
        }],
    );
    assert_cleans(
        &config,
        "https://example.com/page?utm_source=x#section",
        "https://example.com/page",
    );
    assert_cleans(&config, "https://example.com/page#section", "https://example.com/page");
    assert_cleans(&config, "https://example.com#", "https://example.com");
}

// -----------------------------------------------------------------------------
// Exact output reconstruction
// -----------------------------------------------------------------------------

#[test]
fn trims_whitespace() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(&config, "  https://example.com?utm_source=x  ", "https://example.com");
    assert_cleans(&config, "\thttps://example.com/a?utm_source=x\r\n", "https://example.com/a");
}

#[test]
fn rejects_control_whitespace_inside_the_url() {
    let config = simple_config(&["utm_source"]);
    for input in [
        "https://exa\tmple.com/?utm_source=1",
        "https://example.com/a\nb?utm_source=1",
        "https://example.com/?utm_source=1\r&a=2",
    ] {
        assert_eq!(try_clean(input, &config), None, "{input:?}");
    }
}

#[test]
fn does_not_inject_a_path_slash() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(&config, "https://example.com?a=1&utm_source=x", "https://example.com?a=1");
    assert_cleans(&config, "https://example.com/?a=1&utm_source=x", "https://example.com/?a=1");
}

#[test]
fn preserves_authority_as_written() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(
        &config,
        "Http://WWW.Example.COM:8080/Some/Path?utm_source=x",
        "Http://WWW.Example.COM:8080/Some/Path",
    );
    assert_cleans(
        &config,
        "https://user@example.com/?utm_source=x",
        "https://user@example.com/",
    );
}

#[test]
fn does_not_normalize_path_encoding() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(
        &config,
        "https://example.com/a%2fb/%7Euser/caf\u{e9}?utm_source=x",
        "https://example.com/a%2fb/%7Euser/caf\u{e9}",
    );
}

#[test]
fn host_with_ipv6_literal() {
    let config = simple_config(&["utm_source"]);
    assert_cleans(&config, "http://[::1]:3000/x?utm_source=x&y", "http://[::1]:3000/x?y");
}
