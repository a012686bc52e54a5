use super::*;

// Env-reading is a thin shell around these parsers; testing the parsers
// directly avoids mutating process-global env vars in parallel tests.

// =========================================================================
// parse_provider
// =========================================================================

#[test]
fn provider_defaults_to_anthropic() {
    assert_eq!(parse_provider(None).unwrap(), LlmProviderKind::Anthropic);
}

#[test]
fn provider_parses_known_values() {
    assert_eq!(parse_provider(Some("anthropic")).unwrap(), LlmProviderKind::Anthropic);
    assert_eq!(parse_provider(Some("openai")).unwrap(), LlmProviderKind::OpenAi);
}

#[test]
fn provider_rejects_unknown_value() {
    let err = parse_provider(Some("bedrock")).unwrap_err();
    assert!(matches!(err, LlmError::ConfigParse(msg) if msg.contains("bedrock")));
}

// =========================================================================
// parse_openai_mode
// =========================================================================

#[test]
fn openai_mode_defaults_to_responses() {
    assert_eq!(parse_openai_mode(None).unwrap(), OpenAiApiMode::Responses);
}

#[test]
fn openai_mode_parses_chat_completions() {
    assert_eq!(parse_openai_mode(Some("chat_completions")).unwrap(), OpenAiApiMode::ChatCompletions);
}

#[test]
fn openai_mode_rejects_unknown_value() {
    assert!(parse_openai_mode(Some("assistants")).is_err());
}

// =========================================================================
// default_model
// =========================================================================

#[test]
fn default_models_per_provider() {
    assert!(default_model(LlmProviderKind::Anthropic).starts_with("claude-"));
    assert!(default_model(LlmProviderKind::OpenAi).starts_with("gpt-"));
}
