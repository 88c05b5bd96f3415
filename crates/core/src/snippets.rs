//! Copy-paste integration code for a published flow.

use serde::Serialize;

use crate::app_id::AppId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationSnippets {
    pub app_id: AppId,
    pub swift: String,
    pub react_native: String,
}

impl IntegrationSnippets {
    pub fn new(app_id: &AppId, flow_name: &str) -> Self {
        Self {
            app_id: app_id.clone(),
            swift: swift_snippet(app_id, flow_name),
            react_native: react_native_snippet(app_id),
        }
    }
}

/// Name of the generated SwiftUI `App` struct: the flow name with all
/// whitespace removed, plus `App`.
pub fn swift_app_name(flow_name: &str) -> String {
    let mut name: String = flow_name.chars().filter(|c| !c.is_whitespace()).collect();
    name.push_str("App");
    name
}

pub fn swift_snippet(app_id: &AppId, flow_name: &str) -> String {
    format!(
        r#"import SwiftUI
import FlowKit

@main
struct {app_name}: App {{
    init() {{
        FlowKit.configure(
            appId: "{app_id}"
        )
    }}

    var body: some Scene {{
        WindowGroup {{
            ContentView().withOnboarding()
        }}
    }}
}}"#,
        app_name = swift_app_name(flow_name),
    )
}

pub fn react_native_snippet(app_id: &AppId) -> String {
    format!(
        r#"import React from 'react';
import {{ NavigationContainer }} from '@react-navigation/native';
import {{ FlowKitProvider }} from 'react-flowkit';

export default function App() {{
  return (
    <FlowKitProvider appId="{app_id}">
      <NavigationContainer>
        {{/* Your app content */}}
      </NavigationContainer>
    </FlowKitProvider>
  );
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swift_snippet_names_app_after_flow() {
        let id = AppId::parse("my-onboarding-flow-y7opwx03").unwrap();
        let snippets = IntegrationSnippets::new(&id, "My Onboarding Flow");
        assert!(snippets.swift.contains("struct MyOnboardingFlowApp: App {"));
        assert!(snippets
            .swift
            .contains(r#"appId: "my-onboarding-flow-y7opwx03""#));
        assert!(snippets.swift.contains("ContentView().withOnboarding()"));
    }

    #[test]
    fn react_native_snippet_wraps_provider() {
        let id = AppId::parse("fitness-abc12345").unwrap();
        let snippet = react_native_snippet(&id);
        assert!(snippet.contains(r#"<FlowKitProvider appId="fitness-abc12345">"#));
        assert!(snippet.contains("{/* Your app content */}"));
    }
}
