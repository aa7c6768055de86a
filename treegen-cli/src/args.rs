use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use treegen_build::Config;

#[derive(Debug, Clone, Parser)]
#[command(name = "treegen")]
#[command(bin_name = "treegen")]
#[command(version, about, long_about = None)]
pub struct TreegenArgs {
  /// The `.ungram` grammar to generate the tree from.
  pub grammar: PathBuf,

  /// Directory the node types are written to.
  #[arg(long, default_value = "syntaxtree")]
  pub nodes_dir: PathBuf,

  /// Directory the visitors are written to.
  #[arg(long, default_value = "visitor")]
  pub visitor_dir: PathBuf,

  /// Fail if any generated file is out of date, instead of writing it.
  #[arg(long)]
  pub check: bool,

  /// Log more. Repeat for even more.
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  #[command(flatten)]
  pub options: ConfigArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
  /// Prepended to every node type name.
  #[arg(long, default_value = "")]
  pub prefix: String,
  /// Appended to every node type name.
  #[arg(long, default_value = "")]
  pub suffix: String,

  /// Give every node a pointer to its parent.
  #[arg(long)]
  pub parent_pointer:   bool,
  #[arg(long)]
  pub javadoc:          bool,
  /// Annotate generated comments with where they come from.
  #[arg(long)]
  pub debug_comments:   bool,
  /// Write grammar comments inside the depth-first visitor.
  #[arg(long)]
  pub inline_accept:    bool,
  /// Take a variadic user argument in the argument visitors.
  #[arg(long)]
  pub variadic:         bool,

  #[arg(long, default_value = "INode")]
  pub node_interface:   String,
  #[arg(long)]
  pub superclass:       Option<String>,
  #[arg(long, default_value = "NodeToken")]
  pub node_token:       String,

  #[arg(long, default_value = "IRetArguVisitor")]
  pub ret_argu_visitor:  String,
  #[arg(long, default_value = "IRetVisitor")]
  pub ret_visitor:       String,
  #[arg(long, default_value = "IVoidArguVisitor")]
  pub void_argu_visitor: String,
  #[arg(long, default_value = "IVoidVisitor")]
  pub void_visitor:      String,
  #[arg(long, default_value = "R")]
  pub ret_type:          String,
  #[arg(long, default_value = "A")]
  pub argu_type:         String,

  #[arg(long, default_value_t = 148)]
  pub serial_uid: u64,
  #[arg(long, default_value_t = 2)]
  pub indent:     usize,

  /// The package of the node types.
  #[arg(long)]
  pub nodes_package:   Option<String>,
  /// The package of the visitors.
  #[arg(long)]
  pub visitor_package: Option<String>,
}

impl From<ConfigArgs> for Config {
  fn from(args: ConfigArgs) -> Self {
    Config {
      name_prefix: args.prefix,
      name_suffix: args.suffix,
      parent_pointer: args.parent_pointer,
      javadoc_comments: args.javadoc,
      debug_comments: args.debug_comments,
      inline_accept_methods: args.inline_accept,
      variadic_args: args.variadic,
      node_interface: args.node_interface,
      nodes_superclass: args.superclass,
      node_token: args.node_token,
      ret_argu_visitor: args.ret_argu_visitor,
      ret_visitor: args.ret_visitor,
      void_argu_visitor: args.void_argu_visitor,
      void_visitor: args.void_visitor,
      ret_type: args.ret_type,
      argu_type: args.argu_type,
      serial_uid: args.serial_uid,
      indent_amount: args.indent,
      nodes_package: args.nodes_package,
      visitor_package: args.visitor_package,
    }
  }
}
