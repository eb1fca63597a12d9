//! Fixed-content auxiliary files, written verbatim regardless of template

/// (relative path, content) pairs
pub const AUX_FILES: &[(&str, &str)] = &[
    (".gitignore", GITIGNORE),
    (".vscode/settings.json", VSCODE_SETTINGS),
    (".vscode/extensions.json", VSCODE_EXTENSIONS),
    ("analysis_options.yaml", ANALYSIS_OPTIONS),
];

const GITIGNORE: &str = r#"# Miscellaneous
*.class
*.log
*.pyc
*.swp
.DS_Store
.atom/
.buildlog/
.history
.svn/
migrate_working_dir/

# IntelliJ related
*.iml
*.ipr
*.iws
.idea/

# Flutter/Dart/Pub related
**/doc/api/
**/ios/Flutter/.last_build_id
.dart_tool/
.flutter-plugins
.flutter-plugins-dependencies
.pub-cache/
.pub/
/build/

# Symbolication related
app.*.symbols

# Obfuscation related
app.*.map.json

# Android Studio will place build artifacts here
/android/app/debug
/android/app/profile
/android/app/release

# Environment
.env
.env.*
!.env.example

# Coverage
coverage/
"#;

const VSCODE_SETTINGS: &str = r#"{
  "dart.lineLength": 100,
  "editor.formatOnSave": true,
  "editor.rulers": [100],
  "[dart]": {
    "editor.codeActionsOnSave": {
      "source.fixAll": "explicit",
      "source.organizeImports": "explicit"
    },
    "editor.tabSize": 2,
    "editor.insertSpaces": true
  },
  "files.exclude": {
    "**/.dart_tool": true,
    "**/build": true
  }
}
"#;

const VSCODE_EXTENSIONS: &str = r#"{
  "recommendations": [
    "Dart-Code.dart-code",
    "Dart-Code.flutter"
  ]
}
"#;

const ANALYSIS_OPTIONS: &str = r#"include: package:flutter_lints/flutter.yaml

analyzer:
  exclude:
    - "**/*.g.dart"
    - "**/*.freezed.dart"
  language:
    strict-casts: true
    strict-raw-types: true

linter:
  rules:
    always_declare_return_types: true
    avoid_print: true
    prefer_const_constructors: true
    prefer_final_locals: true
    prefer_single_quotes: true
    require_trailing_commas: true
"#;
