// src/page.rs
use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::app::{update, Command, Model, Msg};
use crate::client;
use crate::config::StatusConfig;

type SharedModel = Rc<RefCell<Model>>;

/// Wires the static page to the state machine and kicks off the first fetch.
pub fn start() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    let config = StatusConfig::from_document(&document);
    info!("Status page starting, server address: {}", config.status_base_address);
    set_text(&document, "server-address", &config.status_base_address);

    let model: SharedModel = Rc::new(RefCell::new(Model::new(config)));

    let button = document
        .get_element_by_id("refresh")
        .ok_or_else(|| JsValue::from_str("Missing #refresh element"))?;
    let on_click = {
        let model = model.clone();
        let document = document.clone();
        Closure::<dyn FnMut()>::new(move || {
            dispatch(model.clone(), document.clone(), Msg::Fetch);
        })
    };
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // The listener lives for the whole page lifetime.
    on_click.forget();

    dispatch(model, document, Msg::Fetch);
    Ok(())
}

/// Applies a message, syncs the DOM, and executes any requested side effect.
fn dispatch(model: SharedModel, document: Document, msg: Msg) {
    let command = update(&mut model.borrow_mut(), msg);
    sync_page(&document, &model.borrow());

    if let Some(Command::FetchStatus { seq }) = command {
        let config = model.borrow().config.clone();
        spawn_local(async move {
            let result = client::fetch_status(&config).await;
            dispatch(model, document, Msg::Fetched(seq, result));
        });
    }
}

/// Rewrites the dynamic parts of the page from the model.
fn sync_page(document: &Document, model: &Model) {
    set_text(document, "status-message", &model.message);

    let raw_json = model
        .payload
        .as_ref()
        .map(|p| p.raw_json.as_str())
        .unwrap_or("");
    set_text(document, "raw-json", raw_json);

    let Some(image) = document.get_element_by_id("status-image") else {
        error!("Missing #status-image element");
        return;
    };
    match &model.image {
        Some(uri) => {
            if image.set_attribute("src", uri).is_err() {
                error!("Failed to set status image");
            }
            let _ = image.remove_attribute("hidden");
        }
        None => {
            let _ = image.remove_attribute("src");
            let _ = image.set_attribute("hidden", "");
        }
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    match document.get_element_by_id(id) {
        Some(element) => element.set_text_content(Some(text)),
        None => error!("Missing #{} element", id),
    }
}
