//! Desired state → Caddyfile document.

use crate::config::ProxyConfig;
use crate::domain::DomainRecord;
use crate::render::template::{BlockTemplate, BlockValues, TemplateError, SITE_BLOCK_TEMPLATE};

/// Values shared by every generated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGlobals {
    pub proxy_snippet_name: String,
    pub apps_base_domain: String,
}

impl From<&ProxyConfig> for RenderGlobals {
    fn from(config: &ProxyConfig) -> Self {
        Self {
            proxy_snippet_name: config.snippet_name.clone(),
            apps_base_domain: config.apps_domain.clone(),
        }
    }
}

/// Render the complete document: `base` followed by one site block per
/// domain, in input order.
pub fn render(
    base: &str,
    domains: &[DomainRecord],
    globals: &RenderGlobals,
) -> Result<String, TemplateError> {
    render_with(SITE_BLOCK_TEMPLATE, base, domains, globals)
}

pub fn render_with(
    template: &str,
    base: &str,
    domains: &[DomainRecord],
    globals: &RenderGlobals,
) -> Result<String, TemplateError> {
    let template = BlockTemplate::parse(template)?;

    let mut document = String::with_capacity(base.len() + domains.len() * 160);
    document.push_str(base);
    for domain in domains {
        let values = BlockValues {
            domain_name: &domain.domain_name,
            soa_email: &domain.soa_email,
            proxy_snippet: &globals.proxy_snippet_name,
            application_id: &domain.application_id,
            apps_domain: &globals.apps_base_domain,
        };
        template.render_into(&values, &mut document);
    }
    Ok(document)
}

/// Renderer bound to a fixed set of globals.
#[derive(Debug, Clone)]
pub struct ConfigRenderer {
    globals: RenderGlobals,
    template: String,
}

impl ConfigRenderer {
    pub fn new(globals: RenderGlobals) -> Self {
        Self {
            globals,
            template: SITE_BLOCK_TEMPLATE.to_string(),
        }
    }

    /// Replace the site block template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn globals(&self) -> &RenderGlobals {
        &self.globals
    }

    pub fn render(&self, base: &str, domains: &[DomainRecord]) -> Result<String, TemplateError> {
        render_with(&self.template, base, domains, &self.globals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainStatus;

    fn globals() -> RenderGlobals {
        RenderGlobals {
            proxy_snippet_name: "schemaless-reverse-proxy".to_string(),
            apps_base_domain: "apps.local".to_string(),
        }
    }

    fn domain(name: &str, app: &str) -> DomainRecord {
        DomainRecord {
            id: name.to_string(),
            domain_name: name.to_string(),
            application_id: app.to_string(),
            owner_id: "owner-1".to_string(),
            soa_email: "ops@example.com".to_string(),
            status: DomainStatus::Activated,
        }
    }

    #[test]
    fn test_single_domain_block() {
        let out = render("# base\n", &[domain("app1.example.com", "app123")], &globals()).unwrap();
        assert_eq!(
            out,
            "# base\napp1.example.com {\n\ttls \"ops@example.com\"\n\treverse_proxy {\n\t  import schemaless-reverse-proxy\n\t  header_up Host app123.apps.local\n\t}\n  }"
        );
    }

    #[test]
    fn test_empty_domain_set_returns_base() {
        let base = "{\n\temail ops@example.com\n}\n";
        assert_eq!(render(base, &[], &globals()).unwrap(), base);
    }

    #[test]
    fn test_base_first_then_input_order() {
        let domains = [
            domain("zeta.example.com", "z"),
            domain("alpha.example.com", "a"),
            domain("mid.example.com", "m"),
        ];
        let out = render("# base\n", &domains, &globals()).unwrap();

        assert!(out.starts_with("# base\n"));
        let z = out.find("zeta.example.com {").unwrap();
        let a = out.find("alpha.example.com {").unwrap();
        let m = out.find("mid.example.com {").unwrap();
        assert!(z < a && a < m);
        assert!(out.contains("header_up Host a.apps.local"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let domains = [domain("one.example.com", "1"), domain("two.example.com", "2")];
        let renderer = ConfigRenderer::new(globals());
        let first = renderer.render("# base\n", &domains).unwrap();
        for _ in 0..5 {
            assert_eq!(renderer.render("# base\n", &domains).unwrap(), first);
        }
    }

    #[test]
    fn test_malformed_template_is_a_template_failure() {
        let renderer = ConfigRenderer::new(globals()).with_template("{{domain_name} {");
        let err = renderer.render("", &[domain("a.example.com", "a")]).unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated(0)));
    }
}
