//! Mock project tree for the explorer panel.
//!
//! Nothing here touches the real file system: the tree and every file's
//! contents are hardcoded and live in memory for the whole session.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    File,
    Folder,
}

/// Icon colour family, derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    TypeScript,
    Css,
    Json,
    Markdown,
    Other,
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some("ts") | Some("tsx") => FileKind::TypeScript,
            Some("css") => FileKind::Css,
            Some("json") => FileKind::Json,
            Some("md") => FileKind::Markdown,
            _ => FileKind::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileNode {
    pub id: u32,
    pub name: &'static str,
    pub node_type: NodeType,
    pub children: Vec<FileNode>,
    pub content: &'static str,
}

impl FileNode {
    fn file(id: u32, name: &'static str, content: &'static str) -> Self {
        Self {
            id,
            name,
            node_type: NodeType::File,
            children: Vec::new(),
            content,
        }
    }

    fn folder(id: u32, name: &'static str, children: Vec<FileNode>) -> Self {
        Self {
            id,
            name,
            node_type: NodeType::Folder,
            children,
            content: "",
        }
    }

    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(self.name)
    }
}

/// One line of the flattened tree as the explorer draws it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: u32,
    pub depth: usize,
    pub name: &'static str,
    pub node_type: NodeType,
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub struct FileTree {
    roots: Vec<FileNode>,
    expanded: HashSet<u32>,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::mock()
    }
}

impl FileTree {
    /// The hardcoded project tree, top-level folders expanded
    pub fn mock() -> Self {
        let roots = mock_nodes();
        let expanded = roots.iter().filter(|n| n.is_folder()).map(|n| n.id).collect();
        Self { roots, expanded }
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }

    /// Flip a folder open or closed. Files are ignored.
    pub fn toggle(&mut self, id: u32) {
        let is_folder = self.find(id).is_some_and(|n| n.is_folder());
        if !is_folder {
            return;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn find(&self, id: u32) -> Option<&FileNode> {
        fn walk(nodes: &[FileNode], id: u32) -> Option<&FileNode> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = walk(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, id)
    }

    /// Rows currently visible, depth-first, children of collapsed folders hidden
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.collect_rows(&self.roots, 0, &mut rows);
        rows
    }

    fn collect_rows(&self, nodes: &[FileNode], depth: usize, rows: &mut Vec<TreeRow>) {
        for node in nodes {
            let expanded = self.is_expanded(node.id);
            rows.push(TreeRow {
                id: node.id,
                depth,
                name: node.name,
                node_type: node.node_type,
                expanded,
            });
            if node.is_folder() && expanded {
                self.collect_rows(&node.children, depth + 1, rows);
            }
        }
    }
}

fn mock_nodes() -> Vec<FileNode> {
    vec![
        FileNode::folder(1, "src", vec![
            FileNode::folder(2, "components", vec![
                FileNode::file(3, "ChatPanel.tsx", CHAT_PANEL),
                FileNode::file(4, "CodeEditor.tsx", CODE_EDITOR),
                FileNode::file(5, "WebsiteViewer.tsx", WEBSITE_VIEWER),
                FileNode::file(6, "ViewSwitcher.tsx", VIEW_SWITCHER),
                FileNode::folder(7, "ui", vec![
                    FileNode::file(8, "button.tsx", UI_BUTTON),
                    FileNode::file(9, "sidebar.tsx", UI_SIDEBAR),
                    FileNode::file(10, "resizable.tsx", UI_RESIZABLE),
                ]),
            ]),
            FileNode::folder(11, "pages", vec![
                FileNode::file(12, "Index.tsx", PAGE_INDEX),
                FileNode::file(13, "NotFound.tsx", PAGE_NOT_FOUND),
            ]),
            FileNode::file(14, "App.tsx", APP),
            FileNode::file(15, "main.tsx", MAIN),
            FileNode::file(16, "index.css", INDEX_CSS),
        ]),
        FileNode::folder(17, "public", vec![
            FileNode::file(18, "robots.txt", ROBOTS),
            FileNode::file(19, "favicon.ico", ""),
        ]),
        FileNode::file(20, "package.json", PACKAGE_JSON),
        FileNode::file(21, "tailwind.config.ts", TAILWIND_CONFIG),
        FileNode::file(22, "vite.config.ts", VITE_CONFIG),
        FileNode::file(23, "README.md", README),
    ]
}

const CHAT_PANEL: &str = r#"import { useState } from "react";

export const ChatPanel = ({ onCodeGenerate, onHtmlGenerate }) => {
  const [messages, setMessages] = useState([]);
  const [input, setInput] = useState('');

  // prompts are matched against keyword rules
  return <div className="flex flex-col h-full" />;
};"#;

const CODE_EDITOR: &str = r#"export const CodeEditor = ({ code, onCodeChange }) => {
  const [isEditing, setIsEditing] = useState(false);
  return <pre className="font-mono text-sm">{code}</pre>;
};"#;

const WEBSITE_VIEWER: &str = r#"export const WebsiteViewer = ({ htmlCode }) => {
  return <iframe title="Website Preview" sandbox="allow-scripts" />;
};"#;

const VIEW_SWITCHER: &str = r#"export const ViewSwitcher = ({ activeView, onViewChange }) => {
  const tabs = ['code', 'preview'];
  return <div className="flex items-center" />;
};"#;

const UI_BUTTON: &str = r#"export const Button = ({ children, ...props }) => (
  <button className="px-4 py-2 rounded-md" {...props}>{children}</button>
);"#;

const UI_SIDEBAR: &str = r#"export const Sidebar = ({ children }) => (
  <aside className="w-64 border-r">{children}</aside>
);"#;

const UI_RESIZABLE: &str = r#"export const ResizablePanel = ({ defaultSize, children }) => (
  <div style={{ flexBasis: `${defaultSize}%` }}>{children}</div>
);"#;

const PAGE_INDEX: &str = r#"import { ChatPanel } from "@/components/ChatPanel";

const Index = () => <ChatPanel />;

export default Index;"#;

const PAGE_NOT_FOUND: &str = r#"const NotFound = () => <h1>404</h1>;

export default NotFound;"#;

const APP: &str = r#"import Index from "./pages/Index";

const App = () => <Index />;

export default App;"#;

const MAIN: &str = r#"import { createRoot } from "react-dom/client";
import App from "./App";

createRoot(document.getElementById("root")).render(<App />);"#;

const INDEX_CSS: &str = r#"@tailwind base;
@tailwind components;
@tailwind utilities;

body {
  margin: 0;
}"#;

const ROBOTS: &str = "User-agent: *\nAllow: /";

const PACKAGE_JSON: &str = r#"{
  "name": "jv3",
  "private": true,
  "scripts": {
    "dev": "vite",
    "build": "vite build"
  }
}"#;

const TAILWIND_CONFIG: &str = r#"export default {
  content: ["./src/**/*.{ts,tsx}"],
  theme: { extend: {} },
};"#;

const VITE_CONFIG: &str = r#"import { defineConfig } from "vite";

export default defineConfig({
  server: { port: 8080 },
});"#;

const README: &str = "# jv3\n\nDescribe a component in the chat panel and watch it appear in the editor and preview.";
