/// Settings for one generation pass. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub name_prefix: String,
  pub name_suffix: String,

  /// Adds a parent field, its accessors, and registers every child with
  /// its parent in the constructors.
  pub parent_pointer:        bool,
  pub javadoc_comments:      bool,
  /// Appends the origin of each comment line (field or sub-part, and its
  /// source range) to the generated comments.
  pub debug_comments:        bool,
  /// Keeps the comments of anonymous sub-parts, and writes comments into
  /// the default visitor bodies instead of their documentation.
  pub inline_accept_methods: bool,
  /// Makes the user argument of the argument-taking visitors variadic.
  pub variadic_args:         bool,

  pub node_interface:   String,
  pub nodes_superclass: Option<String>,
  pub node_token:       String,

  pub ret_argu_visitor:  String,
  pub ret_visitor:       String,
  pub void_argu_visitor: String,
  pub void_visitor:      String,
  pub ret_type:          String,
  pub argu_type:         String,

  pub serial_uid:    u64,
  pub indent_amount: usize,

  pub nodes_package:   Option<String>,
  pub visitor_package: Option<String>,
}

pub const DEPTH_FIRST_VOID_VISITOR: &str = "DepthFirstVoidVisitor";

impl Default for Config {
  fn default() -> Self {
    Config {
      name_prefix:           String::new(),
      name_suffix:           String::new(),
      parent_pointer:        false,
      javadoc_comments:      false,
      debug_comments:        false,
      inline_accept_methods: false,
      variadic_args:         false,
      node_interface:        "INode".into(),
      nodes_superclass:      None,
      node_token:            "NodeToken".into(),
      ret_argu_visitor:      "IRetArguVisitor".into(),
      ret_visitor:           "IRetVisitor".into(),
      void_argu_visitor:     "IVoidArguVisitor".into(),
      void_visitor:          "IVoidVisitor".into(),
      ret_type:              "R".into(),
      argu_type:             "A".into(),
      serial_uid:            148,
      indent_amount:         2,
      nodes_package:         None,
      visitor_package:       None,
    }
  }
}

impl Config {
  /// The base node classes every grammar can refer to, in the order the
  /// visitors declare them.
  pub fn base_classes(&self) -> [&str; 6] {
    [
      "NodeChoice",
      "NodeList",
      "NodeListOptional",
      "NodeOptional",
      "NodeSequence",
      self.node_token.as_str(),
    ]
  }

  /// The declaration of the user argument, such as `final A argu`.
  pub fn argu_param(&self) -> String {
    if self.variadic_args {
      format!("final {}... argu", self.argu_type)
    } else {
      format!("final {} argu", self.argu_type)
    }
  }
}
