//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn run(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    // Create default site.yml
    let config_content = r#"# Folio Configuration

# Site
title: Folio
tagline: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
static_dir: static
public_dir: public
blog_dir: blog

# Presentation
date_format: DD/MM/YYYY
highlight_theme: base16-ocean.dark
menu:
  - name: Home
    path: /
"#;

    fs::write(target_dir.join("site.yml"), config_content)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags:
  - meta
description: A first post to make sure everything works.
---

Welcome to your new site. This is your first post; edit it, delete it, and
start writing.

## Quick Start

### Create a new post

```bash
$ folio new "My New Post"
```

### Generate static files

```bash
$ folio generate
```

The generated site lands in `public/`, ready to copy to any static host.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("content/hello-world.md"), sample_post)?;

    Ok(())
}
