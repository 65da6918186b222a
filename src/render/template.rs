//! Site block template with named `{{placeholder}}` slots.
//!
//! Single braces are literal Caddyfile syntax. A double-brace pair marks a
//! placeholder; only the names in [`Placeholder`] are accepted.

use thiserror::Error;

/// The per-domain site block.
pub const SITE_BLOCK_TEMPLATE: &str = "{{domain_name}} {\n\ttls \"{{soa_email}}\"\n\treverse_proxy {\n\t  import {{proxy_snippet}}\n\t  header_up Host {{application_id}}.{{apps_domain}}\n\t}\n  }";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{name}' at byte {offset}")]
    UnknownPlaceholder { name: String, offset: usize },

    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    DomainName,
    SoaEmail,
    ProxySnippet,
    ApplicationId,
    AppsDomain,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "domain_name" => Some(Self::DomainName),
            "soa_email" => Some(Self::SoaEmail),
            "proxy_snippet" => Some(Self::ProxySnippet),
            "application_id" => Some(Self::ApplicationId),
            "apps_domain" => Some(Self::AppsDomain),
            _ => None,
        }
    }
}

/// Values substituted into one block.
#[derive(Debug, Clone, Copy)]
pub struct BlockValues<'a> {
    pub domain_name: &'a str,
    pub soa_email: &'a str,
    pub proxy_snippet: &'a str,
    pub application_id: &'a str,
    pub apps_domain: &'a str,
}

impl<'a> BlockValues<'a> {
    fn get(&self, placeholder: Placeholder) -> &'a str {
        match placeholder {
            Placeholder::DomainName => self.domain_name,
            Placeholder::SoaEmail => self.soa_email,
            Placeholder::ProxySnippet => self.proxy_snippet,
            Placeholder::ApplicationId => self.application_id,
            Placeholder::AppsDomain => self.apps_domain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTemplate {
    segments: Vec<Segment>,
}

impl BlockTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or(TemplateError::Unterminated(offset + start))?;
            let name = after_open[..end].trim();
            let placeholder =
                Placeholder::from_name(name).ok_or_else(|| TemplateError::UnknownPlaceholder {
                    name: name.to_string(),
                    offset: offset + start,
                })?;
            segments.push(Segment::Slot(placeholder));

            let consumed = start + 2 + end + 2;
            rest = &rest[consumed..];
            offset += consumed;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Append the substituted template to `out`.
    pub fn render_into(&self, values: &BlockValues<'_>, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(placeholder) => out.push_str(values.get(*placeholder)),
            }
        }
    }

    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: BlockValues<'static> = BlockValues {
        domain_name: "a.example.com",
        soa_email: "ops@example.com",
        proxy_snippet: "snip",
        application_id: "app1",
        apps_domain: "apps.local",
    };

    #[test]
    fn test_site_block_uses_all_five_placeholders() {
        let template = BlockTemplate::parse(SITE_BLOCK_TEMPLATE).unwrap();
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            vec![
                Placeholder::DomainName,
                Placeholder::SoaEmail,
                Placeholder::ProxySnippet,
                Placeholder::ApplicationId,
                Placeholder::AppsDomain,
            ]
        );
    }

    #[test]
    fn test_single_braces_are_literal() {
        let template = BlockTemplate::parse("{{ domain_name }} { respond {host} }").unwrap();
        let mut out = String::new();
        template.render_into(&VALUES, &mut out);
        assert_eq!(out, "a.example.com { respond {host} }");
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = BlockTemplate::parse("x {{owner}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                name: "owner".to_string(),
                offset: 2
            }
        );
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = BlockTemplate::parse("{{domain_name}} {{soa_email").unwrap_err();
        assert_eq!(err, TemplateError::Unterminated(16));
    }
}
