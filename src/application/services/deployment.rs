//! Deployment resolution - which remote scope a command is registered in

use crate::application::errors::ModuleError;
use crate::domain::entities::{Deployment, DeploymentConfig};
use crate::domain::traits::ScopeId;

/// Scope for a deployment tag.
///
/// Server-scoped tags fall back to the global scope when no server is configured.
pub fn resolve(deployment: Deployment, config: &DeploymentConfig) -> ScopeId {
    let configured = match deployment {
        Deployment::Global => None,
        Deployment::Dev => config.dev.as_deref(),
        Deployment::Support => config.support.as_deref(),
    };

    configured
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ScopeId::guild)
        .unwrap_or_else(ScopeId::global)
}

/// Resolve a textual deployment tag
pub fn resolve_tag(tag: &str, config: &DeploymentConfig) -> Result<ScopeId, ModuleError> {
    Ok(resolve(tag.parse()?, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dev: Option<&str>, support: Option<&str>) -> DeploymentConfig {
        DeploymentConfig {
            dev: dev.map(String::from),
            support: support.map(String::from),
        }
    }

    #[test]
    fn test_global_ignores_configured_servers() {
        for cfg in [config(None, None), config(Some("111"), Some("222"))] {
            assert_eq!(resolve(Deployment::Global, &cfg), ScopeId::global());
        }
    }

    #[test]
    fn test_server_scopes_use_configured_ids() {
        let cfg = config(Some("111"), Some("222"));
        assert_eq!(resolve(Deployment::Dev, &cfg), ScopeId::guild("111"));
        assert_eq!(resolve(Deployment::Support, &cfg), ScopeId::guild("222"));
    }

    #[test]
    fn test_unconfigured_server_falls_back_to_global() {
        let cfg = config(None, Some(" "));
        assert_eq!(resolve(Deployment::Dev, &cfg), ScopeId::global());
        assert_eq!(resolve(Deployment::Support, &cfg), ScopeId::global());
    }

    #[test]
    fn test_resolve_tag() {
        let cfg = config(Some("111"), None);
        assert_eq!(resolve_tag("dev", &cfg).unwrap(), ScopeId::guild("111"));
        assert!(matches!(
            resolve_tag("staging", &cfg),
            Err(ModuleError::UnknownDeployment(_))
        ));
    }
}
