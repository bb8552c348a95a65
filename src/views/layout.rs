use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background-color: #f5f7fa; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 280px; padding: 20px; background-color: #ffffff; border-right: 1px solid #e0e0e0; }
.main { flex: 1; padding: 20px; }
.file-uploader { background-color: #ffffff; border: 1px solid #e0e0e0; border-radius: 5px; padding: 10px; }
button { background-color: #4CAF50; color: white; border: none; border-radius: 5px; padding: 8px 16px; font-weight: 500; cursor: pointer; }
.notice { border-radius: 5px; padding: 12px 16px; margin: 12px 0; }
.notice-info { background-color: #e8f0fe; color: #1a4d8f; }
.notice-success { background-color: #e6f4ea; color: #1e6b34; }
.notice-error { background-color: #fdecea; color: #8a1c1c; }
.quiz-container { background-color: #ffffff; border: 2px solid #d1d5db; border-radius: 8px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1); }
.quiz-question { font-size: 18px; font-weight: bold; color: #1f2937; margin-bottom: 10px; }
.quiz-option { font-size: 16px; color: #374151; margin: 5px 0; }
.quiz-title { font-size: 24px; font-weight: bold; color: #f6d55c; margin-bottom: 20px; }
"#;

pub fn page(title: &str, sidebar: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                div.layout {
                    aside.sidebar { (sidebar) }
                    main.main { (body) }
                }
            }
        }
    }
}
