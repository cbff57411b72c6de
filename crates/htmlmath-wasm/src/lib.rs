extern crate alloc;

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// SAFETY: This application is single threaded, so using AssumeSingleThreaded is allowed.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

use htmlmath::{Element, Fragment, MathConfig, MathDisplay, PrettyPrint};
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;

/// Objects nested deeper than this are not read.
const MAX_FRAGMENT_DEPTH: usize = 256;

#[wasm_bindgen]
pub struct ConfigParseError {
    message: &'static str,
}

#[wasm_bindgen]
impl ConfigParseError {
    #[wasm_bindgen(getter, unchecked_return_type = "string")]
    pub fn message(&self) -> JsValue {
        JsValue::from_str(self.message)
    }
}

#[wasm_bindgen]
pub struct ConvertError {
    message: JsValue,
}

#[wasm_bindgen]
impl ConvertError {
    #[wasm_bindgen(getter, unchecked_return_type = "string")]
    pub fn message(&self) -> JsValue {
        self.message.clone()
    }
}

impl ConvertError {
    fn new(message: &str) -> Self {
        ConvertError {
            message: JsValue::from_str(message),
        }
    }
}

#[wasm_bindgen]
pub struct FragmentToMathML {
    inner: htmlmath::FragmentToMathML,
}

#[wasm_bindgen(typescript_custom_section)]
const TS_INTERFACES: &'static str = r#"
interface HtmlMathOptions {
    prettyPrint?: "never" | "always";
    xmlNamespace?: boolean;
    mathRole?: boolean;
    display?: "inline" | "block";
}

interface HtmlFragment {
    tag: string;
    className?: string;
    style?: string;
    children?: (HtmlFragment | string)[];
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "HtmlMathOptions")]
    pub type HtmlMathOptions;

    #[wasm_bindgen(method, getter)]
    fn prettyPrint(this: &HtmlMathOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn xmlNamespace(this: &HtmlMathOptions) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn mathRole(this: &HtmlMathOptions) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn display(this: &HtmlMathOptions) -> Option<String>;

    #[wasm_bindgen(typescript_type = "HtmlFragment | string")]
    pub type HtmlFragment;
}

#[wasm_bindgen]
impl FragmentToMathML {
    #[wasm_bindgen(constructor)]
    pub fn new(js_config: &HtmlMathOptions) -> Result<Self, ConfigParseError> {
        // This is the poor man's `serde_wasm_bindgen::from_value`.
        let defaults = MathConfig::default();
        let pretty_print = match js_config.prettyPrint().as_deref() {
            None | Some("never") => PrettyPrint::Never,
            Some("always") => PrettyPrint::Always,
            Some(_) => {
                return Err(ConfigParseError {
                    message: "Invalid value for prettyPrint",
                });
            }
        };
        let display = match js_config.display().as_deref() {
            None | Some("inline") => MathDisplay::Inline,
            Some("block") => MathDisplay::Block,
            Some(_) => {
                return Err(ConfigParseError {
                    message: "Invalid value for display",
                });
            }
        };
        let config = MathConfig {
            pretty_print,
            xml_namespace: js_config.xmlNamespace().unwrap_or(defaults.xml_namespace),
            math_role: js_config.mathRole().unwrap_or(defaults.math_role),
            display,
        };
        Ok(FragmentToMathML {
            inner: htmlmath::FragmentToMathML::new(config),
        })
    }

    /// Convert a fragment, throwing a `ConvertError` if it cannot be converted.
    #[wasm_bindgen(unchecked_return_type = "string")]
    pub fn convert(&self, fragment: &HtmlFragment) -> Result<JsValue, ConvertError> {
        let fragment = fragment_from_js(fragment, 0).map_err(ConvertError::new)?;
        match self.inner.convert(&fragment) {
            Ok(result) => Ok(JsValue::from_str(&result)),
            Err(e) => Err(ConvertError::new(&e.error_message())),
        }
    }

    /// Convert a fragment, returning `undefined` if it cannot be converted.
    #[wasm_bindgen(js_name = convertOrSkip)]
    pub fn convert_or_skip(&self, fragment: &HtmlFragment) -> Option<String> {
        let fragment = fragment_from_js(fragment, 0).ok()?;
        self.inner.convert_or_skip(&fragment)
    }
}

/// Read a fragment from a string or a `{ tag, className?, style?, children? }` object.
fn fragment_from_js(value: &JsValue, depth: usize) -> Result<Fragment, &'static str> {
    if depth >= MAX_FRAGMENT_DEPTH {
        return Err("Fragment is nested too deeply");
    }
    if let Some(text) = value.as_string() {
        return Ok(Fragment::text(text));
    }
    if !value.is_object() {
        return Err("Fragment must be a string or an object");
    }
    let Some(tag) = get(value, "tag").as_string() else {
        return Err("Fragment object needs a string `tag`");
    };
    let mut element = Element::new(tag);
    if let Some(class) = get(value, "className").as_string() {
        element = element.with_class(class);
    }
    if let Some(style) = get(value, "style").as_string() {
        element = element.with_style(style);
    }
    let children = get(value, "children");
    if !children.is_undefined() && !children.is_null() {
        let Some(children) = children.dyn_ref::<Array>() else {
            return Err("Fragment `children` must be an array");
        };
        for child in children.iter() {
            element = element.with_child(fragment_from_js(&child, depth + 1)?);
        }
    }
    Ok(element.into())
}

#[inline]
fn get(object: &JsValue, key: &str) -> JsValue {
    Reflect::get(object, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}
