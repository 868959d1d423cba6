use crate::core::{BrowserTrait, Config, PageDriver};
use crate::dom::ElementHandle;
use crate::errors::{AutofillError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Live implementation of [`PageDriver`]: one browser tab holding the
/// attendance form, driven through injected scripts.
///
/// Elements are addressed by the structural CSS path carried on the handle.
/// Scripts re-query on every call and report a missing element instead of
/// throwing, since the page may have re-rendered since the snapshot that
/// produced the handle.
pub struct LivePage<B: BrowserTrait> {
    browser: Arc<B>,
    tab: B::TabHandle,
    session_id: String,
}

impl<B: BrowserTrait> LivePage<B> {
    /// Launch the browser, open the form, and wrap the resulting tab.
    pub async fn open(mut browser: B, config: &Config, url: &str) -> Result<Self> {
        browser.launch(config).await?;
        let tab = browser.new_tab().await?;
        browser.navigate(&tab, url).await?;

        Ok(Self {
            browser: Arc::new(browser),
            tab,
            session_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn current_url(&self) -> Result<String> {
        self.browser.get_url(&self.tab).await
    }

    pub async fn title(&self) -> Result<String> {
        self.browser.get_title(&self.tab).await
    }

    async fn run_element_script(
        &self,
        target: &ElementHandle,
        script: &str,
    ) -> Result<serde_json::Value> {
        let result = self.browser.execute_script(&self.tab, script).await?;

        if result
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            Ok(result)
        } else {
            Err(AutofillError::ElementNotFound(target.css_path.clone()))
        }
    }
}

#[async_trait]
impl<B: BrowserTrait> PageDriver for LivePage<B> {
    async fn capture(&self) -> Result<String> {
        let html = self
            .browser
            .execute_script(&self.tab, "document.documentElement.outerHTML")
            .await?;
        Ok(html.as_str().unwrap_or("").to_string())
    }

    async fn input_value(&self, target: &ElementHandle) -> Result<Option<String>> {
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({path});
                if (!element) return {{ found: false }};
                return {{ found: true, value: element.value || '' }};
            }})()
            "#,
            path = serde_json::to_string(&target.css_path)?
        );

        let result = self.browser.execute_script(&self.tab, &script).await?;
        if result
            .get("found")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            Ok(Some(
                result
                    .get("value")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
            ))
        } else {
            Ok(None)
        }
    }

    async fn write_value(&self, target: &ElementHandle, value: &str) -> Result<()> {
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({path});
                if (!element) return {{ success: false, error: 'element not found' }};

                element.focus();
                element.value = {value};
                element.dispatchEvent(new Event('input', {{ bubbles: true }}));
                element.dispatchEvent(new Event('change', {{ bubbles: true }}));
                element.blur();

                return {{ success: true, finalValue: element.value }};
            }})()
            "#,
            path = serde_json::to_string(&target.css_path)?,
            value = serde_json::to_string(value)?
        );

        self.run_element_script(target, &script).await?;
        debug!(session_id = %self.session_id, path = %target.css_path, "value written");
        Ok(())
    }

    async fn click(&self, target: &ElementHandle) -> Result<()> {
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({path});
                if (!element) return {{ success: false, error: 'element not found' }};

                ['mousedown', 'mouseup', 'click'].forEach((type) => {{
                    element.dispatchEvent(new MouseEvent(type, {{
                        bubbles: true,
                        cancelable: true,
                        view: window
                    }}));
                }});

                return {{ success: true }};
            }})()
            "#,
            path = serde_json::to_string(&target.css_path)?
        );

        self.run_element_script(target, &script).await?;
        debug!(session_id = %self.session_id, path = %target.css_path, "click dispatched");
        Ok(())
    }
}
