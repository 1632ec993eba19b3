//! ROS 2 topic name expansion.
//!
//! Names are qualified against the owning node before any key expression is
//! derived from them:
//! - `/chatter` is absolute and kept as-is,
//! - `~/state` is private and lands under `/<namespace>/<node>`,
//! - anything else is relative to the node's namespace.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicNameError {
    #[error("topic name is empty")]
    Empty,
    #[error("topic name contains invalid component '{0}'")]
    InvalidComponent(String),
    #[error("invalid namespace '{0}'")]
    InvalidNamespace(String),
    #[error("invalid node name '{0}'")]
    InvalidNodeName(String),
}

/// A name component starts with a letter or underscore, followed by
/// alphanumerics or underscores.
fn is_valid_component(component: &str) -> bool {
    let mut bytes = component.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

fn validate_components(path: &str) -> Result<(), TopicNameError> {
    path.split('/')
        .filter(|part| !part.is_empty())
        .find(|part| !is_valid_component(part))
        .map_or(Ok(()), |part| {
            Err(TopicNameError::InvalidComponent(part.to_string()))
        })
}

pub fn validate_node_name(node_name: &str) -> Result<(), TopicNameError> {
    if is_valid_component(node_name) {
        Ok(())
    } else {
        Err(TopicNameError::InvalidNodeName(node_name.to_string()))
    }
}

/// Normalize a namespace to either `""` (root) or `/a/b`.
pub fn normalize_namespace(namespace: &str) -> Result<String, TopicNameError> {
    let trimmed = namespace.trim_start_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.ends_with('/') || trimmed.split('/').any(|part| !is_valid_component(part)) {
        return Err(TopicNameError::InvalidNamespace(namespace.to_string()));
    }
    Ok(format!("/{trimmed}"))
}

/// Qualify a topic name according to ROS 2 naming rules.
///
/// ```
/// use pose_marker_rt::topic_name::qualify_topic_name;
///
/// assert_eq!(qualify_topic_name("/chatter", "/ns", "node").unwrap(), "/chatter");
/// assert_eq!(qualify_topic_name("chatter", "/ns", "node").unwrap(), "/ns/chatter");
/// assert_eq!(qualify_topic_name("~state", "/ns", "node").unwrap(), "/ns/node/state");
/// ```
pub fn qualify_topic_name(
    topic: &str,
    namespace: &str,
    node_name: &str,
) -> Result<String, TopicNameError> {
    if topic.is_empty() {
        return Err(TopicNameError::Empty);
    }
    let namespace = normalize_namespace(namespace)?;
    validate_node_name(node_name)?;

    if let Some(absolute) = topic.strip_prefix('/') {
        let absolute = absolute.strip_suffix('/').unwrap_or(absolute);
        if absolute.is_empty() {
            return Err(TopicNameError::InvalidComponent("/".to_string()));
        }
        validate_components(absolute)?;
        return Ok(format!("/{absolute}"));
    }

    if let Some(private) = topic.strip_prefix('~') {
        let private = private.strip_prefix('/').unwrap_or(private);
        validate_components(private)?;
        return Ok(if private.is_empty() {
            format!("{namespace}/{node_name}")
        } else {
            format!("{namespace}/{node_name}/{private}")
        });
    }

    let relative = topic.strip_suffix('/').unwrap_or(topic);
    validate_components(relative)?;
    Ok(format!("{namespace}/{relative}"))
}
