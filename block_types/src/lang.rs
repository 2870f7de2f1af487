//! Best-effort source language detection for code blocks
//!
//! Matching runs over the lower-cased text with all whitespace removed, so
//! patterns below are written without spaces. The first matching rule wins.

/// Returned when no rule matches
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Guesses the language of `code`
pub fn detect_language(code: &str) -> &'static str {
    let s: String = code
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let has = |pattern: &str| s.contains(pattern);

    if has("<?php") {
        return "PHP";
    }
    if has("<!doctypehtml") {
        return "HTML";
    }
    if has("<?xml") {
        return "XML";
    }
    if has("@echooff") || s.starts_with("rem") {
        return "Batch (CMD)";
    }
    if has("usestrict;") || has("my$") {
        return "Perl";
    }
    if s.starts_with("from") && (has("run") || has("cmd")) {
        return "Dockerfile";
    }
    if has("resource\"") && has("provider\"") {
        return "Terraform (HCL)";
    }
    if s.starts_with("---") && has(":") {
        return "YAML";
    }
    if has("<-") && (has("function(") || has("c(")) {
        return "R";
    }
    if has("defmodule") && has("do") {
        return "Elixir";
    }
    if has("println!") {
        return "Rust";
    }
    if has("write-host") || has("-eq") {
        return "PowerShell";
    }
    if has("@interface") || has("#import<") {
        return "Objective-C";
    }
    if has("main=do") || (has("::") && !has("std::")) {
        return "Haskell";
    }
    if has("(defn") || has("(ns") {
        return "Clojure";
    }
    if has(":symbol") {
        return "Ruby";
    }
    if has(":string") || has(":number") || has("interface") {
        return if has("/>") { "TSX" } else { "TypeScript" };
    }
    if has("std::") || has("#include<iostream>") || has("cin>>") || has("cout<<") {
        return "C++";
    }
    if has("package") || has("import\"") || has(":=") {
        return "Go";
    }
    if has("importjava.") || has("publicclass") || has("system.out.println") {
        return "Java";
    }
    if (has("namespace") && has("class")) || has("usingsystem") {
        return "C#";
    }
    if has("import'dart:") {
        return "Dart";
    }
    if has("importscala.") || (has("def") && has(":") && has("=")) {
        return "Scala";
    }
    if (has("def") && has(":")) || (has("import") && !has("#import")) {
        return "Python";
    }
    if has("def") && has("end") {
        return "Ruby";
    }
    if has("func") && (has("->") || has("var") || has("let")) {
        return "Swift";
    }
    if has("fun") && (has("val") || has("?:")) {
        return "Kotlin";
    }
    if has("console.log(") || has("document.getelementbyid") || has("=>") {
        return if has("/>") { "JSX" } else { "JavaScript" };
    }
    if has("#include<") && has(".h>") {
        return "C";
    }
    if has("localfunction") {
        return "Lua";
    }
    if (has("select") && has("from")) || has("createtable") {
        return "SQL";
    }
    if has("background-color:") || has("font-size:") {
        return "CSS";
    }
    if has("\":\"") || has("\":{") {
        return "JSON";
    }
    if s.starts_with('[') && s.ends_with(']') && !has("{") {
        return "TOML";
    }
    if has("<html>") {
        return "HTML";
    }
    if has("function") && has("end") {
        return "MATLAB";
    }
    if has("echo") && has("$") {
        return "Shell";
    }
    UNKNOWN_LANGUAGE
}
