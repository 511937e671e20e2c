#![allow(dead_code)]

use restive::{
    ActionTable, Application, Controller, DispatchError, Params, ResourceConfig, ResourceOptions,
    dispatch::Pipeline,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Controllers
// ============================================================================

/// A hand-written controller answering `"<method> <id>"`.
pub struct PostsController {
    actions: ActionTable,
    pub invoked: Arc<Mutex<Vec<String>>>,
}

impl PostsController {
    pub fn new(methods: &[&str]) -> Self {
        Self {
            actions: ActionTable::from_methods(methods.iter().copied()).unwrap(),
            invoked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn invoked(&self) -> Vec<String> {
        self.invoked.lock().unwrap().clone()
    }
}

impl Controller for PostsController {
    type Output = String;

    fn actions(&self) -> &ActionTable {
        &self.actions
    }

    async fn invoke(&self, method: &str, params: &Params) -> Result<String, DispatchError> {
        if !self.actions.contains(method) {
            return Err(DispatchError::ActionNotFound(method.to_owned()));
        }
        self.invoked.lock().unwrap().push(method.to_owned());
        Ok(format!("{method} {}", params.get("id").unwrap_or("-")))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// The 24-hex identifier used throughout the tests.
pub const OBJECT_ID: &str = "507f1f77bcf86cd799439011";

/// An application serving `posts` with version negotiation.
pub fn posts_app(methods: &[&str]) -> (Application<String>, Arc<Mutex<Vec<String>>>) {
    let controller = PostsController::new(methods);
    let invoked = controller.invoked.clone();

    let mut app = Application::new();
    app.resource(&ResourceConfig::default(), "post", &ResourceOptions::new())
        .unwrap();
    app.mount("posts", Pipeline::versioned(controller));
    (app, invoked)
}
