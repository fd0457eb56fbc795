//! Host element creation

use crate::props::{EditorProps, DEFAULT_TAG_NAME};
use editor_api::{DocumentContext, HostElement};
use identity::InstanceId;

/// Creates the host element for a new component
///
/// Inline components get a container with the declared tag (default
/// `div`); everything else gets a hidden surrogate text field.
pub fn create_host_element(
    id: &InstanceId,
    props: &EditorProps,
    inline: bool,
    document: DocumentContext,
) -> HostElement {
    if inline {
        let tag = props.tag_name.as_deref().unwrap_or(DEFAULT_TAG_NAME);
        HostElement::inline_container(id.as_str(), tag, document)
    } else {
        HostElement::hidden_surrogate(id.as_str(), props.textarea_name.clone(), document)
    }
}
