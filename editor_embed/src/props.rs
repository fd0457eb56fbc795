//! Declarative properties

use editor_api::{
    ContentChangeHandler, ContentFormat, EventHandler, EventName, SetupCallback,
};
use handler_binder::EventHandlers;
use script_loader::DEFAULT_CLOUD_CHANNEL;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Default tag for inline host elements
pub const DEFAULT_TAG_NAME: &str = "div";

/// Props error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropsError {
    #[error("declarative props must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("{0} is not a known editor event property")]
    UnknownEvent(String),
}

/// A property that accepts either a delimited string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Text(String),
    List(Vec<String>),
}

impl StringOrList {
    /// JSON form passed through to the library
    pub fn to_value(&self) -> Value {
        match self {
            StringOrList::Text(text) => Value::String(text.clone()),
            StringOrList::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }

    /// True for an empty string; an empty list still counts as declared
    pub fn is_blank(&self) -> bool {
        matches!(self, StringOrList::Text(text) if text.is_empty())
    }
}

impl From<&str> for StringOrList {
    fn from(s: &str) -> Self {
        StringOrList::Text(s.to_string())
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(items: Vec<&str>) -> Self {
        StringOrList::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Everything a host declares for one embedded editor
///
/// Fields left `None` are undeclared. Callbacks are attached with the
/// builder methods; data fields may also come from [`EditorProps::from_json`].
#[derive(Debug, Clone)]
pub struct EditorProps {
    pub id: Option<String>,
    pub api_key: Option<String>,
    pub inline: Option<bool>,
    pub initial_value: Option<String>,
    pub value: Option<String>,
    pub on_editor_change: Option<ContentChangeHandler>,
    pub on_init: Option<EventHandler>,
    pub init: Option<Map<String, Value>>,
    /// Host setup run with the handle during construction
    pub init_setup: Option<SetupCallback>,
    pub output_format: Option<ContentFormat>,
    pub tag_name: Option<String>,
    pub cloud_channel: String,
    pub plugins: Option<StringOrList>,
    pub toolbar: Option<StringOrList>,
    pub disabled: Option<bool>,
    pub textarea_name: Option<String>,
    pub tinymce_script_src: Option<String>,
    pub handlers: EventHandlers,
}

impl Default for EditorProps {
    fn default() -> Self {
        Self {
            id: None,
            api_key: None,
            inline: None,
            initial_value: None,
            value: None,
            on_editor_change: None,
            on_init: None,
            init: None,
            init_setup: None,
            output_format: None,
            tag_name: None,
            cloud_channel: DEFAULT_CLOUD_CHANNEL.to_string(),
            plugins: None,
            toolbar: None,
            disabled: None,
            textarea_name: None,
            tinymce_script_src: None,
            handlers: EventHandlers::new(),
        }
    }
}

impl EditorProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the data fields of a declarative property object
    ///
    /// Keys use the host-facing camelCase names (`initialValue`,
    /// `textareaName`, ...). A field whose JSON type does not match is
    /// ignored, as are unknown keys.
    pub fn from_json(props: &Value) -> Result<Self, PropsError> {
        let object = match props {
            Value::Object(object) => object,
            Value::Null => return Err(PropsError::NotAnObject("null")),
            Value::Bool(_) => return Err(PropsError::NotAnObject("boolean")),
            Value::Number(_) => return Err(PropsError::NotAnObject("number")),
            Value::String(_) => return Err(PropsError::NotAnObject("string")),
            Value::Array(_) => return Err(PropsError::NotAnObject("array")),
        };

        let mut result = Self::new();
        for (key, value) in object {
            let accepted = match key.as_str() {
                "id" => set_string(&mut result.id, value),
                "apiKey" => set_string(&mut result.api_key, value),
                "inline" => set_bool(&mut result.inline, value),
                "initialValue" => set_string(&mut result.initial_value, value),
                "value" => set_string(&mut result.value, value),
                "init" => match value {
                    Value::Object(init) => {
                        result.init = Some(init.clone());
                        true
                    }
                    _ => false,
                },
                "outputFormat" => match value.as_str().and_then(ContentFormat::parse) {
                    Some(format) => {
                        result.output_format = Some(format);
                        true
                    }
                    None => false,
                },
                "tagName" => set_string(&mut result.tag_name, value),
                "cloudChannel" => match value {
                    Value::String(channel) => {
                        result.cloud_channel = channel.clone();
                        true
                    }
                    _ => false,
                },
                "plugins" => set_string_or_list(&mut result.plugins, value),
                "toolbar" => set_string_or_list(&mut result.toolbar, value),
                "disabled" => set_bool(&mut result.disabled, value),
                "textareaName" => set_string(&mut result.textarea_name, value),
                "tinymceScriptSrc" => set_string(&mut result.tinymce_script_src, value),
                _ => true,
            };
            if !accepted {
                tracing::debug!(prop = key.as_str(), "ignoring prop with unexpected type");
            }
        }
        Ok(result)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_on_editor_change(mut self, handler: ContentChangeHandler) -> Self {
        self.on_editor_change = Some(handler);
        self
    }

    pub fn with_on_init(mut self, handler: EventHandler) -> Self {
        self.on_init = Some(handler);
        self
    }

    pub fn with_init(mut self, init: Map<String, Value>) -> Self {
        self.init = Some(init);
        self
    }

    pub fn with_init_setup(mut self, setup: SetupCallback) -> Self {
        self.init_setup = Some(setup);
        self
    }

    pub fn with_output_format(mut self, format: ContentFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    pub fn with_cloud_channel(mut self, channel: impl Into<String>) -> Self {
        self.cloud_channel = channel.into();
        self
    }

    pub fn with_plugins(mut self, plugins: impl Into<StringOrList>) -> Self {
        self.plugins = Some(plugins.into());
        self
    }

    pub fn with_toolbar(mut self, toolbar: impl Into<StringOrList>) -> Self {
        self.toolbar = Some(toolbar.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn with_textarea_name(mut self, name: impl Into<String>) -> Self {
        self.textarea_name = Some(name.into());
        self
    }

    pub fn with_script_src(mut self, src: impl Into<String>) -> Self {
        self.tinymce_script_src = Some(src.into());
        self
    }

    /// Declares a handler for an editor event
    ///
    /// Names outside the known event table are still bound; plugins may
    /// emit events of their own.
    pub fn with_handler(mut self, event: impl Into<EventName>, handler: EventHandler) -> Self {
        let event = event.into();
        if EventName::from_prop_key(&event.prop_key()).is_none() {
            tracing::debug!(event = event.as_str(), "declaring handler for an unlisted event");
        }
        self.handlers.insert(event, handler);
        self
    }

    /// Declares a handler under its property key (`onKeyUp`)
    pub fn with_event_prop(self, key: &str, handler: EventHandler) -> Result<Self, PropsError> {
        let event =
            EventName::from_prop_key(key).ok_or_else(|| PropsError::UnknownEvent(key.to_string()))?;
        Ok(self.with_handler(event, handler))
    }

    /// Removes a declared handler
    pub fn without_handler(mut self, event: impl Into<EventName>) -> Self {
        self.handlers.remove(&event.into());
        self
    }

    /// Format used for every content read
    pub fn output_format(&self) -> ContentFormat {
        self.output_format.unwrap_or_default()
    }

    /// A value from the `init` option object
    pub fn init_option(&self, key: &str) -> Option<&Value> {
        self.init.as_ref().and_then(|init| init.get(key))
    }

    /// Content to seed the editor with once it is ready
    pub fn seed_content(&self) -> String {
        self.value
            .clone()
            .or_else(|| self.initial_value.clone())
            .unwrap_or_default()
    }
}

fn set_string(slot: &mut Option<String>, value: &Value) -> bool {
    match value {
        Value::String(s) => {
            *slot = Some(s.clone());
            true
        }
        _ => false,
    }
}

fn set_bool(slot: &mut Option<bool>, value: &Value) -> bool {
    match value {
        Value::Bool(b) => {
            *slot = Some(*b);
            true
        }
        _ => false,
    }
}

fn set_string_or_list(slot: &mut Option<StringOrList>, value: &Value) -> bool {
    match value {
        Value::String(s) => {
            *slot = Some(StringOrList::Text(s.clone()));
            true
        }
        Value::Array(items) => {
            let list: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect();
            *slot = Some(StringOrList::List(list));
            true
        }
        _ => false,
    }
}
