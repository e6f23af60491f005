//! # Suite Construction Module / 套件构建模块
//!
//! This module defines the test suite: the system prompt, the declared tool
//! set, the model registry and the ordered test cases. Suites are assembled
//! through [`TestSuiteBuilder`], validated at construction time, and frozen
//! into an immutable [`TestSuite`] before any execution starts.
//!
//! 此模块定义测试套件：系统提示词、声明的工具集、模型注册表和有序的测试用例。
//! 套件通过 [`TestSuiteBuilder`] 组装，在构建时校验，
//! 并在任何执行开始之前冻结为不可变的 [`TestSuite`]。

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::{Result, bail};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;

use crate::core::message::{self, Message, Role};
use crate::core::provider::{Completion, LanguageModel};

/// Capability to execute a tool. Only meaningful while a suite is being
/// assembled; [`TestSuiteBuilder::build`] strips it from every tool.
/// 执行工具的能力。仅在套件组装期间有意义；
/// [`TestSuiteBuilder::build`] 会从每个工具中剥离它。
pub type ToolExecutor =
    Arc<dyn Fn(serde_json::Value) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync>;

/// Declarative description of a tool the evaluated model may call.
///
/// Tools are descriptive metadata during evaluation: the engine forwards the
/// description and parameter schema to the model capability but never runs
/// the tool itself.
///
/// 被评测模型可以调用的工具的声明式描述。
/// 评测期间工具只是描述性元数据：引擎将描述和参数 schema 转发给模型能力，
/// 但绝不会自己运行工具。
#[derive(Clone, Serialize)]
pub struct Tool {
    /// Human-readable description forwarded to the model.
    /// 转发给模型的人类可读描述。
    pub description: String,
    /// JSON schema for the tool's arguments.
    /// 工具参数的 JSON schema。
    pub parameters: serde_json::Value,
    /// Execute capability. Set to `None` when the suite is frozen, so tools
    /// cannot be accidentally executed during evaluation.
    /// 执行能力。套件冻结时被置为 `None`，因此评测期间工具不可能被意外执行。
    #[serde(skip)]
    pub execute: Option<ToolExecutor>,
}

impl Tool {
    /// Creates a purely descriptive tool.
    pub fn new(description: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            description: description.into(),
            parameters,
            execute: None,
        }
    }

    /// Attaches an execute capability, e.g. when sharing tool definitions
    /// with production code. It is stripped again at suite build time.
    pub fn with_execute(mut self, execute: ToolExecutor) -> Self {
        self.execute = Some(execute);
        self
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("execute", &self.execute.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Boxed assertion run against a completion. Returning `Err` signals test
/// failure; returning `Ok(())` signals success.
/// 针对补全结果运行的装箱断言。返回 `Err` 表示测试失败；返回 `Ok(())` 表示成功。
pub type AssertionFn = Arc<dyn Fn(Completion) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// A named scenario (a conversation prefix) paired with an assertion to
/// evaluate model output. Immutable once added to a suite.
///
/// 一个命名场景（会话前缀），搭配一个用于评估模型输出的断言。
/// 一旦加入套件即不可变。
#[derive(Clone)]
pub struct TestCase {
    /// Unique identifier within the suite. / 套件内的唯一标识符。
    pub name: String,
    /// The stored conversation prefix. / 存储的会话前缀。
    pub messages: Vec<Message>,
    /// The assertion run after a successful generation.
    /// 生成成功后运行的断言。
    pub assertion: AssertionFn,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

/// Input accepted by [`TestSuiteBuilder::eval`]: either a bare prompt string
/// (which doubles as the eval's name and becomes a single user message) or a
/// named scenario with an explicit message list.
pub enum Scenario {
    Prompt(String),
    Named { name: String, messages: Vec<Message> },
}

impl Scenario {
    /// A named scenario with an explicit conversation prefix.
    pub fn named(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Scenario::Named {
            name: name.into(),
            messages,
        }
    }
}

impl From<&str> for Scenario {
    fn from(prompt: &str) -> Self {
        Scenario::Prompt(prompt.to_string())
    }
}

impl From<String> for Scenario {
    fn from(prompt: String) -> Self {
        Scenario::Prompt(prompt)
    }
}

/// Assembles a [`TestSuite`]: register tools and models, declare evals,
/// then freeze with [`build`](Self::build).
#[derive(Debug)]
pub struct TestSuiteBuilder {
    system_prompt: String,
    tools: BTreeMap<String, Tool>,
    models: BTreeMap<String, Arc<dyn LanguageModel>>,
    tests: Vec<TestCase>,
}

impl TestSuiteBuilder {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            tools: BTreeMap::new(),
            models: BTreeMap::new(),
            tests: Vec::new(),
        }
    }

    /// Registers a tool description under the given name.
    pub fn tool(&mut self, name: impl Into<String>, tool: Tool) -> &mut Self {
        self.tools.insert(name.into(), tool);
        self
    }

    /// Registers a model capability under the given identifier.
    pub fn model(
        &mut self,
        identifier: impl Into<String>,
        model: impl LanguageModel + 'static,
    ) -> &mut Self {
        self.models.insert(identifier.into(), Arc::new(model));
        self
    }

    /// Declares one eval: a scenario plus the assertion run against the
    /// model's completion.
    ///
    /// Construction-time validation happens here, before any execution:
    /// a conversation containing a system-role message is rejected (the
    /// system prompt is owned by the suite, not by individual messages),
    /// as is a duplicate test-case name.
    pub fn eval<F, Fut>(&mut self, scenario: impl Into<Scenario>, test: F) -> Result<&mut Self>
    where
        F: Fn(Completion) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let (name, messages) = match scenario.into() {
            Scenario::Prompt(prompt) => {
                let messages = vec![message::user(prompt.clone())];
                (prompt, messages)
            }
            Scenario::Named { name, messages } => (name, messages),
        };

        for (idx, msg) in messages.iter().enumerate() {
            if msg.role == Role::System {
                bail!(
                    "messages[{idx}] cannot be a system message -- the system prompt is set by the suite"
                );
            }
        }
        if self.tests.iter().any(|t| t.name == name) {
            bail!("duplicate test case name: {name}");
        }

        let assertion: AssertionFn = Arc::new(move |completion| test(completion).boxed());
        self.tests.push(TestCase {
            name,
            messages,
            assertion,
        });
        Ok(self)
    }

    /// Freezes the suite. Every tool's execute capability is stripped here,
    /// guaranteeing tools cannot be executed during evaluation.
    pub fn build(self) -> TestSuite {
        let mut tools = self.tools;
        for tool in tools.values_mut() {
            tool.execute = None;
        }
        TestSuite {
            system_prompt: self.system_prompt,
            tools,
            models: self.models,
            tests: self.tests,
        }
    }
}

/// A frozen suite: read-only for the duration of a run.
/// 冻结后的套件：在运行期间只读。
pub struct TestSuite {
    system_prompt: String,
    tools: BTreeMap<String, Tool>,
    models: BTreeMap<String, Arc<dyn LanguageModel>>,
    tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn tools(&self) -> &BTreeMap<String, Tool> {
        &self.tools
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// All registered model identifiers in a stable (sorted) order, used to
    /// build CLI choices and default selections.
    pub fn model_identifiers(&self) -> Vec<String> {
        // BTreeMap iteration order is already sorted by key.
        self.models.keys().cloned().collect()
    }

    /// All declared eval names, sorted, for CLI choices.
    pub fn eval_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tests.iter().map(|t| t.name.clone()).collect();
        names.sort();
        names
    }

    /// Resolves a model by identifier. Unknown identifiers are a
    /// configuration error and abort the command.
    pub fn find_model(&self, identifier: &str) -> Result<&Arc<dyn LanguageModel>> {
        match self.models.get(identifier) {
            Some(model) => Ok(model),
            None => bail!("Model not found: {identifier}"),
        }
    }

    /// Resolves a test case by name.
    pub fn find_eval(&self, name: &str) -> Result<&TestCase> {
        match self.tests.iter().find(|t| t.name == name) {
            Some(case) => Ok(case),
            None => bail!("Eval not found: {name}"),
        }
    }
}
