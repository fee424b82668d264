//! Static files shared by every generated server

/// `schemas/commons.js`: enums and inputs referenced by every entity schema
pub fn schema_commons() -> &'static str {
    r#"module.exports = `

  enum Operator {
    like
    or
    and
    eq
    between
    in
  }

  enum Order {
    DESC
    ASC
  }

  input typeValue {
    type: String
    value: String!
  }

  input paginationInput {
    limit: Int
    offset: Int
  }

`;
"#
}

/// `models/index.js`: loads every ORM model and wires their associations
pub fn models_index() -> &'static str {
    r#"const fs = require('fs');
const path = require('path');
const sequelize = require('../connection');

const models = {};

fs.readdirSync(__dirname)
  .filter(function(file) {
    return (file.indexOf('.') !== 0) && (file !== 'index.js') && (file.slice(-3) === '.js');
  })
  .forEach(function(file) {
    const model = require(path.join(__dirname, file)).init(sequelize, sequelize.Sequelize);
    models[path.basename(file, '.js')] = model;
  });

Object.keys(models).forEach(function(modelName) {
  if (models[modelName].associate) {
    models[modelName].associate(models);
  }
});

module.exports = models;
"#
}
