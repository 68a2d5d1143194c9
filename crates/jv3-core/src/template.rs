//! Canned chat replies, component sources and HTML fragments.
//!
//! Templates are static text with an optional `{{prompt}}` slot. The slot is
//! filled verbatim: prompt text is NOT escaped, so anything rendered from a
//! template must stay inside a surface that never executes it.

use serde::{Deserialize, Serialize};

use crate::classifier::GeneratedArtifact;

/// Placeholder replaced by the user's prompt
pub const PROMPT_SLOT: &str = "{{prompt}}";

/// Which canned template produced an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Website,
    Button,
    Card,
    Default,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Website => "website",
            TemplateId::Button => "button",
            TemplateId::Card => "card",
            TemplateId::Default => "default",
        }
    }

    pub fn all() -> Vec<TemplateId> {
        vec![
            TemplateId::Website,
            TemplateId::Button,
            TemplateId::Card,
            TemplateId::Default,
        ]
    }

    pub fn template(&self) -> &'static Template {
        match self {
            TemplateId::Website => &WEBSITE,
            TemplateId::Button => &BUTTON,
            TemplateId::Card => &CARD,
            TemplateId::Default => &DEFAULT,
        }
    }
}

/// A statically defined message/source/HTML triple
#[derive(Debug)]
pub struct Template {
    pub id: TemplateId,
    pub message: &'static str,
    pub source: &'static str,
    pub html: Option<&'static str>,
}

impl Template {
    /// Fill the prompt slot in every part of the template
    pub fn instantiate(&self, prompt: &str) -> GeneratedArtifact {
        GeneratedArtifact {
            template: self.id,
            chat_message: fill(self.message, prompt),
            source_code: fill(self.source, prompt),
            html: self.html.map(|html| fill(html, prompt)),
        }
    }
}

fn fill(text: &str, prompt: &str) -> String {
    text.replace(PROMPT_SLOT, prompt)
}

// A macro rather than a const so `concat!` can prepend the source banner.
macro_rules! website_html {
    () => {
        r#"<div style="max-width: 800px; margin: 0 auto; padding: 20px; font-family: Arial, sans-serif;">
  <header style="text-align: center; margin-bottom: 40px;">
    <h1 style="color: #333; font-size: 2.5em; margin-bottom: 10px;">Welcome to My Website</h1>
    <p style="color: #666; font-size: 1.2em;">Generated based on your request: "{{prompt}}"</p>
  </header>

  <main>
    <section style="margin-bottom: 30px;">
      <h2 style="color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px;">About</h2>
      <p style="line-height: 1.6; color: #555;">This is a beautiful website created with HTML and CSS. It features a clean design with modern styling.</p>
    </section>

    <section style="margin-bottom: 30px;">
      <h2 style="color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px;">Features</h2>
      <ul style="line-height: 1.8; color: #555;">
        <li>Responsive design</li>
        <li>Clean typography</li>
        <li>Modern color scheme</li>
      </ul>
    </section>

    <section>
      <button style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; border: none; padding: 12px 24px; border-radius: 6px; font-size: 16px; cursor: pointer; transition: transform 0.2s;" onmouseover="this.style.transform='scale(1.05)'" onmouseout="this.style.transform='scale(1)'">
        Get Started
      </button>
    </section>
  </main>
</div>"#
    };
}

static WEBSITE: Template = Template {
    id: TemplateId::Website,
    message: "I've generated a beautiful website for you! Check the preview panel.",
    source: concat!("<!-- Generated HTML Website -->\n", website_html!()),
    html: Some(website_html!()),
};

static BUTTON: Template = Template {
    id: TemplateId::Button,
    message: "I've generated a beautiful button for you!",
    source: BUTTON_SOURCE,
    html: Some(BUTTON_HTML),
};

static CARD: Template = Template {
    id: TemplateId::Card,
    message: "Here's a sleek card component!",
    source: CARD_SOURCE,
    html: Some(CARD_HTML),
};

static DEFAULT: Template = Template {
    id: TemplateId::Default,
    message: "I've generated a React component based on your request: \"{{prompt}}\"",
    source: DEFAULT_SOURCE,
    html: Some(DEFAULT_HTML),
};

const BUTTON_HTML: &str = r#"<button style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; border: none; padding: 12px 24px; border-radius: 6px; font-size: 16px; cursor: pointer; transition: all 0.3s ease; box-shadow: 0 4px 15px rgba(0,0,0,0.2);" onmouseover="this.style.transform='translateY(-2px)'; this.style.boxShadow='0 6px 20px rgba(0,0,0,0.3)'" onmouseout="this.style.transform='translateY(0)'; this.style.boxShadow='0 4px 15px rgba(0,0,0,0.2)'">
  Beautiful Button
</button>"#;

const BUTTON_SOURCE: &str = r#"import React from 'react';

const Button = ({ children, onClick, variant = 'primary' }) => {
  const baseStyles = 'px-4 py-2 rounded-lg font-medium transition-colors';
  const variants = {
    primary: 'bg-blue-600 text-white hover:bg-blue-700',
    secondary: 'bg-gray-200 text-gray-800 hover:bg-gray-300'
  };

  return (
    <button
      className={`${baseStyles} ${variants[variant]}`}
      onClick={onClick}
    >
      {children}
    </button>
  );
};

export default Button;"#;

const CARD_HTML: &str = r#"<div style="background: white; border-radius: 12px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); padding: 24px; max-width: 400px; margin: 20px auto; border: 1px solid #e1e5e9;">
  <h3 style="color: #2c3e50; font-size: 1.5em; margin-bottom: 12px; font-weight: 600;">Beautiful Card</h3>
  <p style="color: #666; line-height: 1.6; margin-bottom: 20px;">This is a sleek card component with modern styling and subtle shadows.</p>
  <button style="background: #3498db; color: white; border: none; padding: 10px 20px; border-radius: 6px; cursor: pointer; transition: background 0.3s;" onmouseover="this.style.background='#2980b9'" onmouseout="this.style.background='#3498db'">
    Learn More
  </button>
</div>"#;

const CARD_SOURCE: &str = r#"import React from 'react';

const Card = ({ title, description, children }) => {
  return (
    <div className="bg-white rounded-lg shadow-md p-6 border border-gray-200">
      {title && <h3 className="text-xl font-semibold mb-2">{title}</h3>}
      {description && <p className="text-gray-600 mb-4">{description}</p>}
      {children}
    </div>
  );
};

export default Card;"#;

const DEFAULT_HTML: &str = r#"<div style="padding: 40px; text-align: center; font-family: Arial, sans-serif;">
  <h2 style="color: #2c3e50; font-size: 2em; margin-bottom: 20px;">Generated Component</h2>
  <p style="color: #666; font-size: 1.1em; line-height: 1.6;">
    This component was generated based on your prompt: "{{prompt}}"
  </p>
  <div style="margin-top: 30px; padding: 20px; background: #f8f9fa; border-radius: 8px; border-left: 4px solid #3498db;">
    <p style="color: #555; margin: 0;">Try asking for specific components like "button", "card", or "website" for better results!</p>
  </div>
</div>"#;

const DEFAULT_SOURCE: &str = r#"import React from 'react';

const MyComponent = () => {
  return (
    <div className="p-4">
      <h2 className="text-2xl font-bold mb-4">Generated Component</h2>
      <p className="text-gray-600">
        This component was generated based on your prompt: "{{prompt}}"
      </p>
    </div>
  );
};

export default MyComponent;"#;
